//! docsearch CLI
//!
//! Runs the search theme over a documentation site configuration.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for docsearch.
#[derive(Parser)]
#[command(
    name = "docsearch",
    version,
    about = "Search page and OpenSearch discovery for documentation sites"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Run the search theme through a site build
    Build {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        output: std::path::PathBuf,
        /// Build only this locale
        #[arg(long)]
        locale: Option<String>,
    },
    /// Validate configuration and translation coverage
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print the default translation messages as JSON
    Messages {
        /// Locale to print (defaults to the default locale)
        #[arg(long)]
        locale: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    docsearch::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, locale } => {
            docsearch::cmd::build::run(&cli.config, &output, locale.as_deref())?;
        }
        Commands::Check { strict } => {
            docsearch::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Messages { locale } => {
            docsearch::cmd::messages::run(&cli.config, locale.as_deref())?;
        }
    }

    Ok(())
}
