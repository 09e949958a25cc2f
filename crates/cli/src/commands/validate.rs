//! Validate command implementation

use crate::error::{CliError, CliResult};
use crate::utils::files::read_input;
use flagd_codec::parser::parse_definition;
use flagd_codec::{FlagdError, ValidationResult, Validator};

pub struct Options {
    pub file: String,
    pub strict: bool,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(result) if result.valid => {
            println!("✓ Validation passed ({})", options.file);
            0
        }
        Ok(result) => {
            eprintln!("{}", Validator::new().format_errors(&result.errors));
            eprintln!(
                "  {} finding{} in {}",
                result.errors.len(),
                if result.errors.len() > 1 { "s" } else { "" },
                options.file
            );
            1
        }
        Err(e) => {
            eprintln!("✗ Validation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<ValidationResult> {
    let content = read_input(&options.file)?;
    let definition = parse_definition(&content, Some(options.file.as_str()))
        .map_err(|e| CliError::Codec(FlagdError::from(e)))?;

    let validator = Validator::new();
    let result = if options.strict {
        validator.validate_strict(&definition)
    } else {
        validator.validate(&definition)
    };

    tracing::debug!(
        file = %options.file,
        strict = options.strict,
        errors = result.errors.len(),
        "Validated file"
    );
    Ok(result)
}
