use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::{known_options, ConfigLoader, OptionKind, PacmanConfig, Settings, SettingsBackend};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Reads pacman.conf and shows how it configures the package manager
#[derive(Parser, Debug)]
#[command(name = "pacman-configure", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to $PACMAN_CONFIG or /etc/pacman.conf)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Maximum nesting of Include directives
    #[arg(long, global = true, default_value_t = config::DEFAULT_MAX_INCLUDE_DEPTH)]
    max_include_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse the configuration and report what it declares
    Check,
    /// Apply the configuration to default settings and print the result
    Show {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the parsed configuration before defaults are applied
    Dump {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// List recognised [options] directives
    Directives,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Toml,
}

fn render<T: Serialize>(value: &T, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(value).context("Failed to render JSON"),
        Format::Toml => toml::to_string_pretty(value).context("Failed to render TOML"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let loader = match cli.config {
        Some(path) => ConfigLoader::new(path),
        None => ConfigLoader::system(),
    }
    .max_include_depth(cli.max_include_depth);

    match cli.command {
        Commands::Check => {
            let config = parse(&loader)?;
            println!("{}: OK", loader.path().display());
            println!("  repositories: {}", config.repos.len());
            for (name, servers) in config.repos.iter() {
                println!("    [{}] {} server(s)", name, servers.len());
            }
            println!("  list entries: {}", config.list_entries());
        }
        Commands::Show { format } => {
            let mut settings = Settings::new();
            loader
                .configure(&mut settings)
                .with_context(|| format!("Failed to configure from {}", loader.path().display()))?;
            info!("Configured root {}", settings.root_path());
            println!("{}", render(&settings, format)?);
        }
        Commands::Dump { format } => {
            let config = parse(&loader)?;
            println!("{}", render(&config, format)?);
        }
        Commands::Directives => {
            for kind in [OptionKind::Boolean, OptionKind::Scalar, OptionKind::List] {
                println!("{}:", kind);
                for (name, _) in known_options().filter(|(_, k)| *k == kind) {
                    println!("  {}", name);
                }
            }
            println!("repository sections:");
            println!("  Server");
            println!("any section:");
            println!("  Include");
        }
    }

    Ok(())
}

fn parse(loader: &ConfigLoader) -> Result<PacmanConfig> {
    loader
        .parse()
        .with_context(|| format!("Failed to parse {}", loader.path().display()))
}
