//! docsearch CLI Library
//!
//! Command implementations for the `docsearch` binary. The commands load the
//! site configuration, run the search theme through a build and report what
//! it contributed.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, messages)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use docsearch::cmd;
//!
//! // Build every configured locale into ./build
//! cmd::build::run(Path::new("docsearch.toml"), Path::new("build"), None).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use docsearch_core::{Config, LoadContext};
pub use docsearch_theme::{BuildStats, Builder, SearchTheme};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// docsearch::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
