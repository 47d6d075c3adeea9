//! Search theme plugin.
//!
//! Registers the search page route, writes the OpenSearch description after the
//! build and links it from every page. All three artifacts exist only while
//! the search page is enabled.

use std::path::{Path, PathBuf};

use docsearch_core::{LoadContext, SearchPage, SiteMetadata, normalize_url};
use tracing::{debug, error, info};

use crate::{
    opensearch::{OPENSEARCH_FILENAME, OPENSEARCH_MIME_TYPE, OpenSearchData, OpenSearchRenderer},
    plugin::{HtmlTag, HtmlTags, Plugin, PluginActions, PostBuildProps, Result, RouteConfig},
    translations::{BundledMessages, TranslationMessages, TranslationSource},
};

/// Plugin name reported to the host.
pub const PLUGIN_NAME: &str = "docsearch-theme-search";

/// UI component rendering the search page.
pub const SEARCH_PAGE_COMPONENT: &str = "@theme/SearchPage";

/// Namespace of the default translation messages.
pub const TRANSLATION_NAMESPACE: &str = "theme-search";

/// Whether the search artifacts are generated, fixed for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Search page served at `route_path`.
    Enabled { route_path: String },
    /// No route, no description file, no head tag.
    Disabled,
}

impl SearchMode {
    /// Derive the mode from the configured search page and base URL.
    #[must_use]
    pub fn new(search_page: &SearchPage, base_url: &str) -> Self {
        match search_page {
            SearchPage::Path(path) => Self::Enabled {
                route_path: normalize_url(&[base_url, path.as_str()]),
            },
            SearchPage::Disabled => Self::Disabled,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

/// The search theme plugin for one build.
#[derive(Debug)]
pub struct SearchTheme {
    mode: SearchMode,
    base_url: String,
    site: SiteMetadata,
    locale: String,
    renderer: OpenSearchRenderer,
    translations: Box<dyn TranslationSource>,
}

impl SearchTheme {
    /// Create the plugin from the host load context.
    #[must_use]
    pub fn new(context: &LoadContext) -> Self {
        let mode = SearchMode::new(&context.theme.algolia.search_page, &context.base_url);
        debug!(locale = %context.i18n.current_locale, ?mode, "search theme loaded");

        Self {
            mode,
            base_url: context.base_url.clone(),
            site: context.site.clone(),
            locale: context.i18n.current_locale.clone(),
            renderer: OpenSearchRenderer::default(),
            translations: Box::new(BundledMessages::new()),
        }
    }

    /// Use a different OpenSearch renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: OpenSearchRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Use a different source for the default translation messages.
    #[must_use]
    pub fn with_translations(mut self, source: impl TranslationSource + 'static) -> Self {
        self.translations = Box::new(source);
        self
    }

    #[must_use]
    pub fn mode(&self) -> &SearchMode {
        &self.mode
    }

    /// Href of the description document relative to the site root.
    #[must_use]
    pub fn opensearch_href(&self) -> String {
        normalize_url(&[self.base_url.as_str(), OPENSEARCH_FILENAME])
    }

    fn write_opensearch(&self, out_dir: &Path) -> Result<PathBuf> {
        let url = format!("{}{}", self.site.url, self.base_url);
        let favicon = self.site.favicon.as_deref().map(|favicon| {
            normalize_url(&[self.site.url.as_str(), self.base_url.as_str(), favicon])
        });

        let document = self.renderer.render(OpenSearchData {
            title: &self.site.title,
            url: &url,
            favicon: favicon.as_deref(),
        })?;

        let path = out_dir.join(OPENSEARCH_FILENAME);
        std::fs::write(&path, document)?;
        Ok(path)
    }
}

impl Plugin for SearchTheme {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn theme_path(&self) -> Option<PathBuf> {
        Some(Path::new(env!("CARGO_MANIFEST_DIR")).join("theme"))
    }

    fn source_theme_path(&self) -> Option<PathBuf> {
        Some(
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("src")
                .join("theme"),
        )
    }

    fn default_code_translation_messages(&self) -> Result<TranslationMessages> {
        Ok(self.translations.read(&self.locale, TRANSLATION_NAMESPACE)?)
    }

    fn content_loaded(&self, actions: &mut dyn PluginActions) -> Result<()> {
        let SearchMode::Enabled { route_path } = &self.mode else {
            return Ok(());
        };

        debug!(path = %route_path, "registering search page route");
        actions.add_route(RouteConfig {
            path: route_path.clone(),
            component: SEARCH_PAGE_COMPONENT.to_string(),
            exact: true,
        });
        Ok(())
    }

    fn post_build(&self, props: &PostBuildProps<'_>) -> Result<()> {
        if !self.mode.is_enabled() {
            return Ok(());
        }

        match self.write_opensearch(props.out_dir) {
            Ok(path) => {
                info!(path = %path.display(), "generated OpenSearch description");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Generating OpenSearch file failed.");
                Err(e)
            }
        }
    }

    fn inject_html_tags(&self) -> HtmlTags {
        if !self.mode.is_enabled() {
            return HtmlTags::default();
        }

        HtmlTags {
            head_tags: vec![
                HtmlTag::new("link")
                    .with_attribute("rel", "search")
                    .with_attribute("type", OPENSEARCH_MIME_TYPE)
                    .with_attribute("title", self.site.title.as_str())
                    .with_attribute("href", self.opensearch_href()),
            ],
        }
    }
}
