//! docsearch Theme Library
//!
//! Adds a search page, an OpenSearch discovery document and the matching
//! `<head>` link to a statically generated documentation site.
//!
//! # Modules
//!
//! - [`template`] - Compiled text templates and the process-wide template cache
//! - [`opensearch`] - OpenSearch description rendering
//! - [`translations`] - Default UI strings per locale
//! - [`plugin`] - Lifecycle hooks and the types exchanged with the host
//! - [`search_theme`] - The search theme plugin
//! - [`build`] - Host-side driver running plugins through one build

pub mod build;
pub mod opensearch;
pub mod plugin;
pub mod search_theme;
pub mod template;
pub mod translations;

pub use build::{BuildStats, Builder, RouteCollector};
pub use opensearch::{OpenSearchData, OpenSearchRenderer};
pub use plugin::{
    HtmlTag, HtmlTags, Plugin, PluginActions, PluginError, PostBuildProps, RouteConfig,
};
pub use search_theme::{SearchMode, SearchTheme};
pub use template::{CompiledTemplate, RenderConfig, TemplateCache, TemplateContext};
pub use translations::{
    BundledMessages, LocaleDirectory, TranslationMessages, TranslationSource,
};
