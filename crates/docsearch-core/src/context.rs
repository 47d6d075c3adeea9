//! Load context handed to plugins.
//!
//! A [`LoadContext`] is built once per locale and stays immutable for the
//! whole build of that locale.

use std::path::{Path, PathBuf};

use crate::{
    config::{Config, ThemeConfig},
    error::{CoreError, Result},
    url::normalize_url,
};

/// Site metadata visible to plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetadata {
    /// Site title.
    pub title: String,

    /// Canonical site URL, without the base URL.
    pub url: String,

    /// Favicon path relative to the base URL.
    pub favicon: Option<String>,
}

/// Locale information for the current build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nContext {
    pub current_locale: String,
    pub default_locale: String,
    pub locales: Vec<String>,
}

/// Everything a plugin may read about the site being built.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Base URL for the current locale, always with leading and trailing `/`.
    pub base_url: String,

    pub site: SiteMetadata,

    pub i18n: I18nContext,

    /// Validated theme configuration.
    pub theme: ThemeConfig,
}

impl LoadContext {
    /// Context for the default locale.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::build(config, &config.i18n.default_locale)
    }

    /// Context for a configured locale.
    ///
    /// Non-default locales are served under a locale segment of the base URL
    /// (`/docs/` becomes `/docs/fr/`).
    pub fn for_locale(config: &Config, locale: &str) -> Result<Self> {
        if !config.i18n.locales.iter().any(|l| l == locale) {
            return Err(CoreError::unknown_locale(locale, &config.i18n.locales));
        }
        Ok(Self::build(config, locale))
    }

    fn build(config: &Config, locale: &str) -> Self {
        let base_url = if locale == config.i18n.default_locale {
            config.site.base_url.clone()
        } else {
            normalize_url(&[config.site.base_url.as_str(), locale, "/"])
        };

        Self {
            base_url,
            site: SiteMetadata {
                title: config.site.title.clone(),
                url: config.site.url.clone(),
                favicon: config.site.favicon.clone(),
            },
            i18n: I18nContext {
                current_locale: locale.to_string(),
                default_locale: config.i18n.default_locale.clone(),
                locales: config.i18n.locales.clone(),
            },
            theme: config.theme.clone(),
        }
    }

    /// Whether this context builds the default locale.
    #[must_use]
    pub fn is_default_locale(&self) -> bool {
        self.i18n.current_locale == self.i18n.default_locale
    }

    /// Output directory for this locale below the site output root.
    #[must_use]
    pub fn out_dir(&self, root: &Path) -> PathBuf {
        if self.is_default_locale() {
            root.to_path_buf()
        } else {
            root.join(&self.i18n.current_locale)
        }
    }
}
