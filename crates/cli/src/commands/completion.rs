//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io;

pub struct Options {
    pub shell: String,
}

/// Generate shell completion script
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Completion generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    if options.shell.is_empty() {
        return Err(CliError::Message(
            "Shell name is required. Supported shells: bash, zsh, fish".to_string(),
        ));
    }

    let shell = match options.shell.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => {
            return Err(CliError::Message(format!(
                "Unsupported shell: {}. Supported shells: bash, zsh, fish",
                options.shell
            )));
        }
    };

    let mut cmd = get_cli_command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
