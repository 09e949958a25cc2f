//! Import command implementation

use crate::error::CliResult;
use crate::utils::files::{read_input, write_output};
use flagd_codec::{import_flag, to_pretty_json, Flag};

pub struct Options {
    pub file: String,
    pub output: Option<String>,
    pub indent: usize,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(flag) => {
            if let Some(output) = &options.output {
                println!("✓ Imported flag '{}' to {output}", flag.key);
            }
            0
        }
        Err(e) => {
            eprintln!("✗ Import failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<Flag> {
    let content = read_input(&options.file)?;
    let flag = import_flag(&content, Some(options.file.as_str()))?;

    let skipped = flag.rules.iter().filter(|r| r.unrecognized.is_some()).count();
    if skipped > 0 {
        tracing::warn!(
            flag = %flag.key,
            rules = skipped,
            "Some conditions use unsupported operators and were replaced by placeholders"
        );
    }

    let model = serde_json::to_value(&flag)?;
    write_output(options.output.as_deref(), &to_pretty_json(&model, options.indent))?;
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::test_helpers::SAMPLE_WIRE;
    use flagd_codec::{Operator, ValueType};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_import_writes_model() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("flags.json");
        let output = temp_dir.path().join("model.json");
        fs::write(&input, SAMPLE_WIRE).unwrap();

        let flag = run_inner(&Options {
            file: input.to_str().unwrap().to_string(),
            output: Some(output.to_str().unwrap().to_string()),
            indent: 2,
        })
        .unwrap();
        assert_eq!(flag.key, "new-welcome-banner");

        let written: Flag = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, flag);
        assert_eq!(written.value_type, ValueType::Boolean);
        assert!(written.targeting_enabled);
        assert_eq!(written.rules[0].condition.operator, Operator::EndsWith);
        assert_eq!(written.rules[0].target_variant_name, "on");
        assert!(written.has_default_rule);
    }

    #[test]
    fn test_import_invalid_format() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("flags.json");
        fs::write(&input, "[1, 2, 3]").unwrap();

        let result = run_inner(&Options {
            file: input.to_str().unwrap().to_string(),
            output: None,
            indent: 2,
        });
        match result {
            Err(CliError::Codec(e)) => assert_eq!(
                e.to_string(),
                "Invalid flagd format: Could not parse the definition"
            ),
            _ => panic!("Expected CliError::Codec for a non-flagd document"),
        }
    }

    #[test]
    fn test_import_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("flags.json");
        fs::write(&input, r#"{"f": "#).unwrap();

        let result = run_inner(&Options {
            file: input.to_str().unwrap().to_string(),
            output: None,
            indent: 2,
        });
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("JSON parse error: "));
    }
}
