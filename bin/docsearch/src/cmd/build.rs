//! Build command - runs the search theme for each locale

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use docsearch_core::{Config, LoadContext};
use docsearch_theme::{BuildStats, Builder, SearchTheme};

/// Run the build command.
///
/// Builds every configured locale, or only `locale` when given. Non-default
/// locales are written to `<output>/<locale>`.
pub fn run(config_path: &Path, output: &Path, locale: Option<&str>) -> Result<Vec<BuildStats>> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?locale, "Starting build");

    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let locales: Vec<&str> = match locale {
        Some(l) => vec![l],
        None => config.i18n.locales.iter().map(String::as_str).collect(),
    };

    let mut all_stats = Vec::with_capacity(locales.len());
    for locale in locales {
        let context = LoadContext::for_locale(&config, locale)
            .wrap_err_with(|| format!("Cannot build locale '{locale}'"))?;
        let out_dir = context.out_dir(output);

        let stats = Builder::new(&out_dir)
            .with_plugin(SearchTheme::new(&context))
            .build()
            .wrap_err_with(|| format!("Build failed for locale '{locale}'"))?;

        println!();
        println!("  Locale:     {locale}");
        for route in &stats.routes {
            println!("  Route:      {} -> {}", route.path, route.component);
        }
        for tag in &stats.head_tags {
            println!("  Head tag:   {tag}");
        }
        println!("  Messages:   {}", stats.messages);
        println!("  Output:     {}", out_dir.display());

        all_stats.push(stats);
    }

    let duration = start.elapsed();
    println!();
    println!("  Build completed successfully!");
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!();

    tracing::info!(locales = all_stats.len(), ?duration, "Build completed successfully");

    Ok(all_stats)
}
