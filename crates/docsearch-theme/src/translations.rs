//! Default UI strings.
//!
//! Messages are stored as flat JSON objects, one file per locale and namespace:
//! `<root>/<locale>/<namespace>.json`. The files under `locales/` are compiled
//! into the crate; [`LocaleDirectory`] reads the same layout from disk.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Message id to default text.
pub type TranslationMessages = BTreeMap<String, String>;

/// Translation loading errors.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// IO error while reading a message file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Message file is not a flat JSON object of strings.
    #[error("invalid translation file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A bundled message file is not a flat JSON object of strings.
    #[error("invalid bundled translations {locale}/{namespace}: {source}")]
    Bundled {
        locale: String,
        namespace: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslationError>;

/// Source of default translation messages.
pub trait TranslationSource: fmt::Debug + Send + Sync {
    /// Messages for `locale` in `namespace`. Unknown locales yield an empty map.
    fn read(&self, locale: &str, namespace: &str) -> Result<TranslationMessages>;
}

/// Translation files laid out in per-locale directories.
#[derive(Debug, Clone)]
pub struct LocaleDirectory {
    root: PathBuf,
}

impl LocaleDirectory {
    /// Create a source reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory holding the locale directories.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the message file for an exact locale.
    #[must_use]
    pub fn file_path(&self, locale: &str, namespace: &str) -> PathBuf {
        self.root.join(locale).join(format!("{namespace}.json"))
    }

    /// Path of the first existing message file for `locale`, if any.
    #[must_use]
    pub fn resolve(&self, locale: &str, namespace: &str) -> Option<PathBuf> {
        locales_to_try(locale)
            .into_iter()
            .map(|candidate| self.file_path(candidate, namespace))
            .find(|path| path.is_file())
    }
}

impl TranslationSource for LocaleDirectory {
    fn read(&self, locale: &str, namespace: &str) -> Result<TranslationMessages> {
        let Some(path) = self.resolve(locale, namespace) else {
            debug!(locale, namespace, "no default translations found");
            return Ok(TranslationMessages::new());
        };

        let content = std::fs::read_to_string(&path).map_err(|source| TranslationError::Io {
            path: path.clone(),
            source,
        })?;
        let messages: TranslationMessages = serde_json::from_str(&content)
            .map_err(|source| TranslationError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), count = messages.len(), "loaded default translations");
        Ok(messages)
    }
}

/// Message files compiled into the crate, as `(locale, namespace, json)`.
const BUNDLED: &[(&str, &str, &str)] = &[
    (
        "en",
        "theme-search",
        include_str!("../locales/en/theme-search.json"),
    ),
    (
        "fr",
        "theme-search",
        include_str!("../locales/fr/theme-search.json"),
    ),
];

/// The default messages shipped inside the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledMessages;

impl BundledMessages {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Bundled locale used for `locale`, if any.
    #[must_use]
    pub fn resolve(&self, locale: &str, namespace: &str) -> Option<&'static str> {
        self.find(locale, namespace).map(|(found, _)| found)
    }

    /// Locales with bundled messages in `namespace`.
    pub fn locales<'a>(&self, namespace: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        BUNDLED
            .iter()
            .filter(move |(_, ns, _)| *ns == namespace)
            .map(|(locale, _, _)| *locale)
    }

    fn find(&self, locale: &str, namespace: &str) -> Option<(&'static str, &'static str)> {
        locales_to_try(locale).into_iter().find_map(|candidate| {
            BUNDLED
                .iter()
                .find(|(l, ns, _)| *l == candidate && *ns == namespace)
                .map(|(l, _, json)| (*l, *json))
        })
    }
}

impl TranslationSource for BundledMessages {
    fn read(&self, locale: &str, namespace: &str) -> Result<TranslationMessages> {
        let Some((found, json)) = self.find(locale, namespace) else {
            debug!(locale, namespace, "no bundled translations");
            return Ok(TranslationMessages::new());
        };

        let messages: TranslationMessages =
            serde_json::from_str(json).map_err(|source| TranslationError::Bundled {
                locale: found.to_string(),
                namespace: namespace.to_string(),
                source,
            })?;

        debug!(locale = found, namespace, count = messages.len(), "loaded bundled translations");
        Ok(messages)
    }
}

/// The full locale first, then its language subtag (`pt-BR`, then `pt`).
fn locales_to_try(locale: &str) -> Vec<&str> {
    let mut locales = vec![locale];
    if let Some((language, _)) = locale.split_once(['-', '_']) {
        if !language.is_empty() {
            locales.push(language);
        }
    }
    locales
}
