//! flagd-edit CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
mod test_helpers;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use commands::{completion, export, import, new, validate};
use tracing_subscriber::EnvFilter;

/// flagd-edit - Import, edit, export and validate flagd flag definitions
#[derive(Parser)]
#[command(name = "flagd-edit")]
#[command(about = "flagd-edit - Import, export and validate flagd flag definitions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Path to config file (default: .flagd-edit.yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a flagd definition file (JSON or YAML)
    Validate {
        /// Path to the flagd definition file
        file: String,
        /// Also check condition shapes against the JSON schema
        #[arg(long)]
        strict: bool,
    },
    /// Import a flagd definition into an editable model
    Import {
        /// Path to the flagd definition file (JSON or YAML)
        file: String,
        /// Output path for the model (default: stdout)
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Export an editable model as flagd JSON
    Export {
        /// Path to the model file
        model: String,
        /// Output path for the flagd JSON (default: stdout)
        #[arg(long, short)]
        output: Option<String>,
        /// Skip validating the exported definition
        #[arg(long)]
        no_validate: bool,
    },
    /// Create a new flag model with default variants
    New {
        /// Flag key
        #[arg(long)]
        key: String,
        /// Value type: boolean, string, number or object
        #[arg(long = "type")]
        value_type: Option<String>,
        /// Output path for the model (default: stdout)
        #[arg(long, short)]
        output: Option<String>,
        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell: bash, zsh or fish
        shell: String,
    },
}

/// Get the CLI command structure (used by completion generation)
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

/// Install the stderr log subscriber. `--verbose` forces debug level,
/// otherwise `RUST_LOG` applies, falling back to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match utils::config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to load configuration");
            eprintln!("  Error: {e}");
            std::process::exit(1);
        }
    };

    let exit_code = match cli.command {
        Commands::Validate { file, strict } => {
            let opts = validate::Options {
                file,
                strict: strict || config.strict,
            };
            validate::run(&opts)
        }
        Commands::Import { file, output } => {
            let opts = import::Options {
                file,
                output,
                indent: config.indent,
            };
            import::run(&opts)
        }
        Commands::Export {
            model,
            output,
            no_validate,
        } => {
            let opts = export::Options {
                model,
                output,
                validate: !no_validate,
                strict: config.strict,
                indent: config.indent,
            };
            export::run(&opts)
        }
        Commands::New {
            key,
            value_type,
            output,
            force,
        } => {
            let opts = new::Options {
                key,
                value_type,
                default_type: config.default_type,
                output,
                force,
                indent: config.indent,
            };
            new::run(&opts)
        }
        Commands::Completion { shell } => {
            let opts = completion::Options { shell };
            completion::run(&opts)
        }
    };

    std::process::exit(exit_code);
}
