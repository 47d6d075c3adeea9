//! Plugin lifecycle hooks.
//!
//! The host owns the build and calls each hook at its own point in the
//! sequence. Hooks a plugin does not implement contribute nothing.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    template::{TemplateError, escape_xml},
    translations::{TranslationError, TranslationMessages},
};

/// Plugin hook errors.
#[derive(Debug, Error)]
pub enum PluginError {
    /// IO error, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Translation loading error.
    #[error("translation error: {0}")]
    Translation(#[from] TranslationError),
}

impl PluginError {
    /// The underlying IO error, if this is one.
    #[must_use]
    pub fn as_io(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for plugin hooks.
pub type Result<T> = std::result::Result<T, PluginError>;

/// A route registered with the host router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Absolute route path, including the base URL.
    pub path: String,

    /// UI component rendered for the route.
    pub component: String,

    /// Match only this path, not sub-paths.
    pub exact: bool,
}

/// An HTML element injected by a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTag {
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
}

impl HtmlTag {
    /// Create a tag without attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl fmt::Display for HtmlTag {
    /// Serializes as a void element with escaped attribute values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag_name)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{}\"", escape_xml(value))?;
        }
        f.write_str(">")
    }
}

/// Tags a plugin contributes to every generated page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTags {
    pub head_tags: Vec<HtmlTag>,
}

impl HtmlTags {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head_tags.is_empty()
    }
}

/// Actions available while content is loaded.
pub trait PluginActions {
    /// Register a route with the host router.
    fn add_route(&mut self, route: RouteConfig);
}

/// Information passed to [`Plugin::post_build`].
#[derive(Debug, Clone, Copy)]
pub struct PostBuildProps<'a> {
    /// Directory holding the finished site.
    pub out_dir: &'a Path,
}

/// A site build plugin.
pub trait Plugin: fmt::Debug {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Directory of the packaged UI components.
    fn theme_path(&self) -> Option<PathBuf> {
        None
    }

    /// Directory of the uncompiled UI sources, for development hosts.
    fn source_theme_path(&self) -> Option<PathBuf> {
        None
    }

    /// Default UI strings for the current locale.
    fn default_code_translation_messages(&self) -> Result<TranslationMessages> {
        Ok(TranslationMessages::new())
    }

    /// Called once content is loaded. Routes are registered here.
    fn content_loaded(&self, _actions: &mut dyn PluginActions) -> Result<()> {
        Ok(())
    }

    /// Called after all pages are written to the output directory.
    fn post_build(&self, _props: &PostBuildProps<'_>) -> Result<()> {
        Ok(())
    }

    /// Tags injected into every page.
    fn inject_html_tags(&self) -> HtmlTags {
        HtmlTags::default()
    }
}
