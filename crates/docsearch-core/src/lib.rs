//! docsearch Core Library
//!
//! Configuration, load context, URL composition and error handling shared by the
//! docsearch theme and CLI.

pub mod config;
pub mod context;
pub mod error;
pub mod url;

pub use self::url::normalize_url;
pub use config::{AlgoliaConfig, Config, I18nConfig, SearchPage, SiteConfig, ThemeConfig};
pub use context::{I18nContext, LoadContext, SiteMetadata};
pub use error::{CoreError, Result};
