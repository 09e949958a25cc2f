//! Integration tests for individual commands


use integration_test_helpers::*;

#[test]
fn test_validate_command() {
    let project = TestProject::with_flags(&targeted_flag_definition("my-flag"));

    let output = project.run_command_success(&["validate", "flags.json"]);
    assert!(stdout_of(&output).contains("✓ Validation passed"));

    project.run_command_success(&["validate", "flags.json", "--strict"]);
}

#[test]
fn test_validate_command_yaml() {
    let project = TestProject::new();
    project.write_file(
        "flags.yaml",
        "my-flag:\n  state: ENABLED\n  variants:\n    red: \"#f00\"\n    blue: \"#00f\"\n  defaultVariant: red\n",
    );

    project.run_command_success(&["validate", "flags.yaml"]);
}

#[test]
fn test_validate_command_reports_findings() {
    let project = TestProject::with_flags(r#"{"f": {}}"#);

    let output = project.run_command_failure(&["validate", "flags.json"]);
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Flag 'f': 'state' is required"));
    assert!(stderr.contains("Flag 'f': 'variants' is required"));
    assert!(stderr.contains("Flag 'f': 'defaultVariant' is required"));
}

#[test]
fn test_import_then_export_round_trip() {
    let project = TestProject::with_flags(&targeted_flag_definition("my-flag"));

    project.run_command_success(&["import", "flags.json", "--output", "model.json"]);
    let model = project.read_json("model.json");
    assert_eq!(model["key"], "my-flag");
    assert_eq!(model["valueType"], "boolean");
    assert_eq!(model["rules"][0]["condition"]["operator"], "in_list");
    assert_eq!(model["rules"][0]["condition"]["value"], "us, ca");
    assert_eq!(model["rules"][1]["condition"]["operator"], "sem_ver");
    assert_eq!(model["hasDefaultRule"], true);

    project.run_command_success(&["export", "model.json", "--output", "exported.json"]);
    assert_eq!(
        project.read_json("exported.json"),
        project.read_json("flags.json")
    );
}

#[test]
fn test_import_to_stdout() {
    let project = TestProject::with_flags(&targeted_flag_definition("my-flag"));

    let output = project.run_command_success(&["import", "flags.json"]);
    let model: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(model["defaultVariantName"], "off");
}

#[test]
fn test_import_keeps_unsupported_condition_as_placeholder() {
    let project = TestProject::with_flags(
        r#"{"f": {"state": "ENABLED", "variants": {"a": "x", "b": "y"}, "defaultVariant": "a",
            "targeting": {"if": [{"fractional": [["a", 50], ["b", 50]]}, "b", "a"]}}}"#,
    );

    let output = project.run_command_success(&["import", "flags.json", "--output", "model.json"]);
    assert!(stderr_of(&output).contains("WARN"));

    let model = project.read_json("model.json");
    assert_eq!(model["rules"][0]["condition"]["operator"], "ends_with");
    assert_eq!(model["rules"][0]["condition"]["attributeName"], "");
    assert_eq!(model["rules"][0]["targetVariantName"], "b");
    assert!(model["rules"][0]["unrecognized"]["fractional"].is_array());
}

#[test]
fn test_new_then_export() {
    let project = TestProject::new();

    project.run_command_success(&["new", "--key", "dark-mode", "--type", "object", "--output", "model.json"]);
    let model = project.read_json("model.json");
    assert_eq!(model["valueType"], "object");
    assert_eq!(model["defaultVariantName"], "foo");

    let output = project.run_command_success(&["export", "model.json"]);
    let wire: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(
        wire,
        serde_json::json!({
            "dark-mode": {
                "state": "ENABLED",
                "variants": {"foo": {"foo": "foo"}, "bar": {"bar": "bar"}},
                "defaultVariant": "foo"
            }
        })
    );
}

#[test]
fn test_config_file_sets_defaults() {
    let project = TestProject::new();
    project.write_file(".flagd-edit.yaml", "indent: 4\ndefault_type: number\n");

    project.run_command_success(&["new", "--key", "limit", "--output", "model.json"]);
    let text = project.read_file("model.json");
    assert!(text.starts_with("{\n    \"key\": \"limit\""));
    assert_eq!(project.read_json("model.json")["valueType"], "number");
}

#[test]
fn test_explicit_config_path() {
    let project = TestProject::with_flags(
        r#"{"f": {"state": "ENABLED", "variants": {"a": 1}, "defaultVariant": "a",
            "targeting": {"if": [{"fractional": [["a", 100]]}, "a"]}}}"#,
    );
    project.write_file("conf/strict.yaml", "strict: true\n");

    project.run_command_success(&["validate", "flags.json"]);
    project.run_command_failure(&["--config", "conf/strict.yaml", "validate", "flags.json"]);
}

#[test]
fn test_completion_command() {
    let project = TestProject::new();

    for shell in ["bash", "zsh", "fish"] {
        let output = project.run_command_success(&["completion", shell]);
        assert!(stdout_of(&output).contains("flagd-edit"));
    }
}

#[test]
fn test_verbose_logging() {
    let project = TestProject::with_flags(&targeted_flag_definition("my-flag"));

    let output = project.run_command_success(&["--verbose", "validate", "flags.json"]);
    assert!(stderr_of(&output).contains("DEBUG"));

    let output = project.run_command_success(&["validate", "flags.json"]);
    assert!(!stderr_of(&output).contains("DEBUG"));
}
