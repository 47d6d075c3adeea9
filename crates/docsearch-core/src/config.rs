//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for docsearch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Localization settings.
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Theme settings.
    pub theme: ThemeConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Canonical site URL (e.g., "https://example.com").
    pub url: String,

    /// Path prefix the site is served under (e.g., "/docs/").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Favicon path relative to the base URL.
    #[serde(default)]
    pub favicon: Option<String>,
}

/// Localization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Locale served at the base URL.
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// All built locales. Empty means only the default locale.
    #[serde(default)]
    pub locales: Vec<String>,
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Search settings.
    pub algolia: AlgoliaConfig,
}

/// Search theme configuration.
///
/// Only `search_page` drives the generated artifacts; the remaining fields are
/// handed to the search UI unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgoliaConfig {
    /// Search application id.
    pub app_id: String,

    /// Public search-only API key.
    pub api_key: String,

    /// Index to query.
    pub index_name: String,

    /// Search page path, or `false` to disable the page.
    #[serde(default)]
    pub search_page: SearchPage,

    /// Restrict results to the current language and version.
    #[serde(default = "default_true")]
    pub contextual_search: bool,

    /// Send click and conversion events.
    #[serde(default)]
    pub insights: bool,

    /// Results matching this pattern open as external links.
    #[serde(default)]
    pub external_url_regex: Option<String>,

    /// Extra query parameters passed to the search backend.
    #[serde(default)]
    pub search_parameters: Option<toml::Table>,

    /// Rewrite applied to result pathnames.
    #[serde(default)]
    pub replace_search_result_pathname: Option<PathnameReplacement>,
}

/// Pathname rewrite for search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathnameReplacement {
    pub from: String,
    pub to: String,
}

/// Where the search page is served, if anywhere.
///
/// Written in TOML as a path string or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SearchPageValue", into = "SearchPageValue")]
pub enum SearchPage {
    /// Search page served at this path, relative to the base URL.
    Path(String),
    /// No search page, no discovery document, no head tag.
    Disabled,
}

impl SearchPage {
    /// The configured path, if the search page is enabled.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            Self::Disabled => None,
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::Path(DEFAULT_SEARCH_PAGE.to_string())
    }
}

/// Default search page path.
pub const DEFAULT_SEARCH_PAGE: &str = "search";

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SearchPageValue {
    Path(String),
    Flag(bool),
}

impl TryFrom<SearchPageValue> for SearchPage {
    type Error = String;

    fn try_from(value: SearchPageValue) -> std::result::Result<Self, Self::Error> {
        match value {
            SearchPageValue::Path(path) => Ok(Self::Path(path)),
            SearchPageValue::Flag(false) => Ok(Self::Disabled),
            SearchPageValue::Flag(true) => {
                Err("search_page must be a path or false, not true".to_string())
            }
        }
    }
}

impl From<SearchPage> for SearchPageValue {
    fn from(page: SearchPage) -> Self {
        match page {
            SearchPage::Path(path) => Self::Path(path),
            SearchPage::Disabled => Self::Flag(false),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "/".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            CoreError::Toml(source) => CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                source,
            ),
            other => other,
        })
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()
    }

    /// Load configuration using the config crate, with `DOCSEARCH__*`
    /// environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("DOCSEARCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()
    }

    /// Validate the configuration, filling in derived defaults.
    fn validate(mut self) -> Result<Self> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.url.is_empty() {
            return Err(CoreError::config("site.url cannot be empty"));
        }

        let parsed = url::Url::parse(&self.site.url).map_err(|e| {
            CoreError::config_with_source(
                format!("site.url must be an absolute URL, got '{}'", self.site.url),
                e,
            )
        })?;
        if !parsed.has_host() {
            return Err(CoreError::config(format!(
                "site.url must have a host, got '{}'",
                self.site.url
            )));
        }

        if self.site.url.ends_with('/') {
            tracing::warn!(url = %self.site.url, "site.url should not have a trailing slash");
            let trimmed = self.site.url.trim_end_matches('/').len();
            self.site.url.truncate(trimmed);
        }

        if !self.site.base_url.starts_with('/') {
            return Err(CoreError::config(format!(
                "site.base_url must start with '/', got '{}'",
                self.site.base_url
            )));
        }

        if !self.site.base_url.ends_with('/') {
            tracing::warn!(
                base_url = %self.site.base_url,
                "site.base_url should end with a trailing slash"
            );
            self.site.base_url.push('/');
        }

        if self.site.favicon.as_deref() == Some("") {
            self.site.favicon = None;
        }

        if self.i18n.locales.is_empty() {
            self.i18n.locales.push(self.i18n.default_locale.clone());
        } else if !self.i18n.locales.contains(&self.i18n.default_locale) {
            return Err(CoreError::config(format!(
                "i18n.default_locale '{}' is not listed in i18n.locales",
                self.i18n.default_locale
            )));
        }

        self.theme = validate_theme_config(self.theme)?;
        Ok(self)
    }

    /// Whether the search page and its artifacts are generated.
    #[must_use]
    pub fn search_page_enabled(&self) -> bool {
        !self.theme.algolia.search_page.is_disabled()
    }
}

/// Validate the theme section.
///
/// Called once while loading; consumers of a loaded [`Config`] never
/// re-validate.
pub fn validate_theme_config(theme: ThemeConfig) -> Result<ThemeConfig> {
    let algolia = &theme.algolia;

    for (field, value) in [
        ("app_id", &algolia.app_id),
        ("api_key", &algolia.api_key),
        ("index_name", &algolia.index_name),
    ] {
        if value.trim().is_empty() {
            return Err(CoreError::config(format!(
                "theme.algolia.{field} cannot be empty"
            )));
        }
    }

    if algolia.search_page.path().is_some_and(|path| path.trim().is_empty()) {
        return Err(CoreError::config(
            "theme.algolia.search_page cannot be empty, use false to disable it",
        ));
    }

    Ok(theme)
}
