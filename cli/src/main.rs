//! CodeScanner CLI - Drive a code scanner adapter from the terminal
//!
//! A command-line tool that runs the scanner adapter against a simulated
//! device fed from stdin or a file, and manages session configuration.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use codescanner_core::ConfigStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codescanner")]
#[command(author, version, about = "Drive a barcode/2D-code scanner adapter")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Use this configuration file instead of ~/.codescanner/config.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed scans to a simulated scanner and print the codes it emits
    Listen {
        /// Read scan lines from a file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Leave the port closed at start, regardless of configuration
        #[arg(long)]
        no_enable: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Code type for lines without a type prefix
    SetDefaultType { code_type: char },
    /// Separator between type prefix and text
    SetSeparator { separator: char },
    /// Open the port when a session starts
    AutoEnable {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Print codes as JSON by default
    JsonOutput {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = match cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };

    match cli.command {
        Some(Commands::Listen { input, no_enable }) => {
            commands::listen::run(&store, input, no_enable, cli.json).await?;
        }
        Some(Commands::Config { action }) => match action {
            None | Some(ConfigAction::Show) => commands::config::show(&store, cli.json).await?,
            Some(ConfigAction::SetDefaultType { code_type }) => {
                commands::config::set_default_type(&store, code_type).await?
            }
            Some(ConfigAction::SetSeparator { separator }) => {
                commands::config::set_separator(&store, separator).await?
            }
            Some(ConfigAction::AutoEnable { enabled }) => {
                commands::config::auto_enable(&store, enabled).await?
            }
            Some(ConfigAction::JsonOutput { enabled }) => {
                commands::config::json_output(&store, enabled).await?
            }
        },
        None => {
            // Default: listen on stdin
            commands::listen::run(&store, None, false, cli.json).await?;
        }
    }

    Ok(())
}
