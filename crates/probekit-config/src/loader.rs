// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./probekit.toml` > `~/.config/probekit/probekit.toml` > `/etc/probekit/probekit.toml`
//! with environment variable overrides via `PROBEKIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ProbekitConfig;

pub(crate) const LOCAL_CONFIG: &str = "probekit.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/probekit/probekit.toml";

/// Path of the per-user config file, if a config directory is known.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("probekit/probekit.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/probekit/probekit.toml` (system-wide)
/// 3. `~/.config/probekit/probekit.toml` (user XDG config)
/// 4. `./probekit.toml` (local directory)
/// 5. `PROBEKIT_*` environment variables
pub fn load_config() -> Result<ProbekitConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ProbekitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ProbekitConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ProbekitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ProbekitConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ProbekitConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// keys survive: `PROBEKIT_SHUTDOWN_TIMEOUT_SECS` maps to
/// `shutdown.timeout_secs`, not `shutdown.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("PROBEKIT_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    key.replacen("program_", "program.", 1)
        .replacen("logging_", "logging.", 1)
        .replacen("shutdown_", "shutdown.", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("program_name"), "program.name");
        assert_eq!(map_env_key("logging_level"), "logging.level");
        assert_eq!(map_env_key("shutdown_timeout_secs"), "shutdown.timeout_secs");
    }
}
