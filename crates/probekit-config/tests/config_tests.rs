// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Probekit configuration system.

use std::io::Write;

use probekit_config::diagnostic::ConfigError;
use probekit_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_probekit_config() {
    let toml = r#"
[program]
name = "loadavg"

[logging]
level = "debug"

[shutdown]
timeout_secs = 12
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.program.name, "loadavg");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.shutdown.timeout_secs, 12);
}

/// Missing sections fall back to defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should be valid");
    assert_eq!(config.program.name, "heartbeat");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.shutdown.timeout_secs, 5);
}

/// Partial sections keep defaults for the keys they omit.
#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_and_validate_str("[logging]\nlevel = \"warn\"\n").unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.program.name, "heartbeat");
}

/// A typo in a known section becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_suggests_correction() {
    let errors = load_and_validate_str("[program]\nnaem = \"loadavg\"\n")
        .expect_err("should reject unknown key");

    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "naem");
            assert_eq!(suggestion.as_deref(), Some("name"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// An unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[probes]\nenabled = true\n")
        .expect_err("should reject unknown section");
    assert!(matches!(errors[0], ConfigError::UnknownKey { ref key, .. } if key == "probes"));
}

/// Wrong value types are reported with the offending key path.
#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[shutdown]\ntimeout_secs = \"soon\"\n")
        .expect_err("should reject string timeout");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert_eq!(key, "shutdown.timeout_secs"),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_are_returned() {
    let errors = load_and_validate_str("[program]\nname = \"\"\n[shutdown]\ntimeout_secs = 0\n")
        .expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// An explicit config file is honoured.
#[test]
fn loads_explicit_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[program]\nname = \"loadavg\"").unwrap();

    let config = load_and_validate_path(file.path()).expect("file config should load");
    assert_eq!(config.program.name, "loadavg");
}

/// A typo in an explicit file gets the same suggestion as inline TOML.
#[test]
fn explicit_file_typo_is_diagnosed() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[logging]\nlevle = \"debug\"").unwrap();

    let errors = load_and_validate_path(file.path()).expect_err("should reject typo");
    match &errors[0] {
        ConfigError::UnknownKey { suggestion, .. } => {
            assert_eq!(suggestion.as_deref(), Some("level"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}
