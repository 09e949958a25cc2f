//! New command implementation

use crate::error::{CliError, CliResult};
use crate::utils::files::write_output;
use flagd_codec::{to_pretty_json, Flag, ValueType};
use std::path::Path;

pub struct Options {
    pub key: String,
    pub value_type: Option<String>,
    pub default_type: ValueType,
    pub output: Option<String>,
    pub force: bool,
    pub indent: usize,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(flag) => {
            if let Some(output) = &options.output {
                println!(
                    "✓ Created {} flag '{}' in {output}",
                    flag.value_type, flag.key
                );
            }
            0
        }
        Err(e) => {
            eprintln!("✗ Failed to create flag");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<Flag> {
    let key = options.key.trim();
    if key.is_empty() {
        return Err(CliError::Message("Flag key is required".to_string()));
    }

    let value_type = match &options.value_type {
        Some(name) => name.parse::<ValueType>().map_err(CliError::Message)?,
        None => options.default_type,
    };

    if let Some(output) = &options.output {
        if Path::new(output).exists() && !options.force {
            return Err(CliError::Message(format!(
                "{output} already exists. Use --force to overwrite"
            )));
        }
    }

    let flag = Flag::new(key, value_type);
    let model = serde_json::to_value(&flag)?;
    write_output(options.output.as_deref(), &to_pretty_json(&model, options.indent))?;
    Ok(flag)
}
