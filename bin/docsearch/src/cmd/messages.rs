//! Messages command - prints the default translation messages

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use docsearch_core::{Config, LoadContext};
use docsearch_theme::{Plugin, SearchTheme, TranslationMessages};

/// Load the default messages for `locale` (or the default locale).
pub fn load(config_path: &Path, locale: Option<&str>) -> Result<TranslationMessages> {
    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    let locale = locale.unwrap_or(&config.i18n.default_locale);

    let context = LoadContext::for_locale(&config, locale)?;
    let messages = SearchTheme::new(&context)
        .default_code_translation_messages()
        .wrap_err_with(|| format!("Failed to load translations for '{locale}'"))?;

    tracing::debug!(locale, count = messages.len(), "Loaded default messages");
    Ok(messages)
}

/// Run the messages command.
pub fn run(config_path: &Path, locale: Option<&str>) -> Result<()> {
    let messages = load(config_path, locale)?;
    println!("{}", serde_json::to_string_pretty(&messages)?);
    Ok(())
}
