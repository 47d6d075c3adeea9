//! Build orchestration.
//!
//! A minimal host that runs plugins through the lifecycle hooks in the order a
//! site build calls them.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::plugin::{HtmlTag, Plugin, PluginActions, PluginError, PostBuildProps, RouteConfig};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A plugin hook failed.
    #[error("plugin {plugin} failed in {hook}: {source}")]
    Plugin {
        plugin: String,
        hook: &'static str,
        #[source]
        source: PluginError,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Routes registered during `content_loaded`.
#[derive(Debug, Clone, Default)]
pub struct RouteCollector {
    routes: Vec<RouteConfig>,
}

impl RouteCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    #[must_use]
    pub fn into_routes(self) -> Vec<RouteConfig> {
        self.routes
    }
}

impl PluginActions for RouteCollector {
    fn add_route(&mut self, route: RouteConfig) {
        debug!(path = %route.path, component = %route.component, "route added");
        self.routes.push(route);
    }
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Routes registered by plugins.
    pub routes: Vec<RouteConfig>,

    /// Tags injected into every page head.
    pub head_tags: Vec<HtmlTag>,

    /// Number of default translation messages loaded.
    pub messages: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Runs plugins through one build.
#[derive(Debug)]
pub struct Builder {
    output_dir: PathBuf,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Builder {
    /// Create a new builder writing to `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            plugins: Vec::new(),
        }
    }

    /// Add a plugin. Hooks run in registration order.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Execute the lifecycle: translations, content loaded, head tags, post build.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            output = %self.output_dir.display(),
            plugins = self.plugins.len(),
            "starting build"
        );

        fs::create_dir_all(&self.output_dir)?;

        for plugin in &self.plugins {
            let messages = plugin
                .default_code_translation_messages()
                .map_err(|source| hook_error(plugin.as_ref(), "translations", source))?;
            stats.messages += messages.len();
        }

        let mut collector = RouteCollector::new();
        for plugin in &self.plugins {
            plugin
                .content_loaded(&mut collector)
                .map_err(|source| hook_error(plugin.as_ref(), "content_loaded", source))?;
        }
        stats.routes = collector.into_routes();

        for plugin in &self.plugins {
            stats.head_tags.extend(plugin.inject_html_tags().head_tags);
        }

        let props = PostBuildProps {
            out_dir: &self.output_dir,
        };
        for plugin in &self.plugins {
            plugin
                .post_build(&props)
                .map_err(|source| hook_error(plugin.as_ref(), "post_build", source))?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            routes = stats.routes.len(),
            head_tags = stats.head_tags.len(),
            messages = stats.messages,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }
}

fn hook_error(plugin: &dyn Plugin, hook: &'static str, source: PluginError) -> BuildError {
    BuildError::Plugin {
        plugin: plugin.name().to_string(),
        hook,
        source,
    }
}
