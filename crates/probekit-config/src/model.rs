// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Probekit runner.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Probekit configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProbekitConfig {
    /// Which registered program `probekit run` constructs.
    #[serde(default)]
    pub program: ProgramConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Shutdown behaviour.
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

/// Program selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramConfig {
    /// Registry name of the program to run.
    #[serde(default = "default_program_name")]
    pub name: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            name: default_program_name(),
        }
    }
}

fn default_program_name() -> String {
    "heartbeat".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShutdownConfig {
    /// Seconds to wait for the program to unload before giving up.
    #[serde(default = "default_shutdown_timeout")]
    pub timeout_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_shutdown_timeout(),
        }
    }
}

fn default_shutdown_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ProbekitConfig::default();
        assert_eq!(config.program.name, "heartbeat");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.shutdown.timeout_secs, 5);
    }

    #[test]
    fn defaults_serialize_to_toml() {
        let rendered = toml::to_string(&ProbekitConfig::default()).unwrap();
        assert!(rendered.contains("[program]"));
        assert!(rendered.contains("name = \"heartbeat\""));
        assert!(rendered.contains("timeout_secs = 5"));
    }
}
