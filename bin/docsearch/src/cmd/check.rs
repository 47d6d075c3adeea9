//! Check command - validate configuration and translations

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use docsearch_core::Config;
use docsearch_theme::{BundledMessages, search_theme::TRANSLATION_NAMESPACE};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loading the configuration runs its full validation. Problems that still
/// allow a build are reported as warnings.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match Config::load(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");

            println!("\nChecking search page...");
            check_search_page(&config, &mut result);

            println!("\nChecking translations...");
            check_translations(&config, &BundledMessages::new(), &mut result);
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_search_page(config: &Config, result: &mut ValidationResult) {
    match config.theme.algolia.search_page.path() {
        Some(path) => println!("  ✓ Search page at '{path}'"),
        None => result.add_warning(
            "Search page is disabled; no route, OpenSearch file or head tag will be generated",
        ),
    }
}

fn check_translations(config: &Config, source: &BundledMessages, result: &mut ValidationResult) {
    for locale in &config.i18n.locales {
        match source.resolve(locale, TRANSLATION_NAMESPACE) {
            Some(found) => println!("  ✓ {locale}: bundled '{found}' messages"),
            None => {
                let available: Vec<_> = source.locales(TRANSLATION_NAMESPACE).collect();
                result.add_warning(format!(
                    "No default translations for locale '{locale}' (bundled: {})",
                    available.join(", ")
                ));
            }
        }
    }
}
