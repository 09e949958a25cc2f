//! Export command implementation

use crate::error::{CliError, CliResult};
use crate::utils::files::{read_input, write_output};
use flagd_codec::{export_flag, Flag, Validator};
use serde_json::Value;

pub struct Options {
    pub model: String,
    pub output: Option<String>,
    pub validate: bool,
    pub strict: bool,
    pub indent: usize,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(flag) => {
            if let Some(output) = &options.output {
                println!("✓ Exported flag '{}' to {output}", flag.key);
            }
            0
        }
        Err(e) => {
            eprintln!("✗ Export failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<Flag> {
    let content = read_input(&options.model)?;
    let flag: Flag = serde_json::from_str(&content)
        .map_err(|e| CliError::Message(format!("Invalid model file {}: {e}", options.model)))?;

    let text = export_flag(&flag, options.indent);

    if options.validate {
        // validate what a reader of the written text would see
        let written: Value = serde_json::from_str(&text)?;
        let validator = Validator::new();
        let result = if options.strict {
            validator.validate_strict(&written)
        } else {
            validator.validate(&written)
        };

        if !result.valid {
            eprintln!("{}", validator.format_errors(&result.errors));
            return Err(CliError::Message(format!(
                "Exported definition for '{}' is invalid; nothing was written",
                flag.key
            )));
        }
    }

    write_output(options.output.as_deref(), &text)?;
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagd_codec::{Condition, Operator, Rule, ValueType};
    use std::fs;
    use tempfile::TempDir;

    fn write_model(temp_dir: &TempDir, flag: &Flag) -> String {
        let path = temp_dir.path().join("model.json");
        fs::write(&path, serde_json::to_string_pretty(flag).unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn options(model: String, output: Option<String>) -> Options {
        Options {
            model,
            output,
            validate: true,
            strict: false,
            indent: 2,
        }
    }

    #[test]
    fn test_export_writes_wire_json() {
        let temp_dir = TempDir::new().unwrap();
        let mut flag = Flag::new("checkout", ValueType::String);
        flag.targeting_enabled = true;
        flag.rules = vec![Rule::new(
            Condition::new("country", Operator::InList, "us, ca"),
            "bar",
        )];
        let model = write_model(&temp_dir, &flag);
        let output = temp_dir.path().join("out").join("flags.json");

        run_inner(&options(model, Some(output.to_str().unwrap().to_string()))).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["checkout"]["state"], "ENABLED");
        assert_eq!(written["checkout"]["defaultVariant"], "foo");
        assert_eq!(
            written["checkout"]["targeting"]["if"],
            serde_json::json!([{"in": [{"var": "country"}, ["us", "ca"]]}, "bar"])
        );
    }

    #[test]
    fn test_export_refuses_invalid_definition() {
        let temp_dir = TempDir::new().unwrap();
        let mut flag = Flag::new("checkout", ValueType::Boolean);
        flag.default_variant_name = "maybe".to_string();
        let model = write_model(&temp_dir, &flag);
        let output = temp_dir.path().join("flags.json");

        let result = run_inner(&options(model.clone(), Some(output.to_str().unwrap().to_string())));
        assert!(matches!(result, Err(CliError::Message(_))));
        assert!(!output.exists());

        let mut opts = options(model, Some(output.to_str().unwrap().to_string()));
        opts.validate = false;
        run_inner(&opts).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_export_uses_indent() {
        let temp_dir = TempDir::new().unwrap();
        let model = write_model(&temp_dir, &Flag::new("wide", ValueType::Number));
        let output = temp_dir.path().join("flags.json");

        let mut opts = options(model, Some(output.to_str().unwrap().to_string()));
        opts.indent = 4;
        run_inner(&opts).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("{\n    \"wide\": {\n        \"state\""));
    }

    #[test]
    fn test_export_invalid_model_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.json");
        fs::write(&path, r#"{"key": "x"}"#).unwrap();

        let result = run_inner(&options(path.to_str().unwrap().to_string(), None));
        match result {
            Err(CliError::Message(msg)) => assert!(msg.contains("Invalid model file")),
            _ => panic!("Expected CliError::Message for an incomplete model"),
        }
    }
}
