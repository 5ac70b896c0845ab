// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks what serde attributes cannot express: non-empty program names,
//! known log levels, and positive timeouts.

use crate::diagnostic::ConfigError;
use crate::model::ProbekitConfig;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ProbekitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.program.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "program.name must not be empty".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.shutdown.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "shutdown.timeout_secs must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
