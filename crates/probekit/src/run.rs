// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `probekit run` command implementation.
//!
//! Constructs the selected program from the process-wide registry, loads it,
//! starts its event watcher, and unloads it once shutdown is requested.

use std::time::Duration;

use probekit_config::ProbekitConfig;
use probekit_core::ProbekitError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the selected program until SIGINT or SIGTERM.
///
/// `program_override` (from `--program`) wins over `program.name` in config.
pub async fn run_program(
    config: &ProbekitConfig,
    program_override: Option<&str>,
) -> Result<(), ProbekitError> {
    let name = program_override.unwrap_or(&config.program.name);
    let timeout = Duration::from_secs(config.shutdown.timeout_secs);
    run_until(name, timeout, shutdown::install_signal_handler()).await
}

/// Runs the program registered as `name` until `cancel` fires, then unloads
/// it, allowing at most `timeout` for the unload.
pub async fn run_until(
    name: &str,
    timeout: Duration,
    cancel: CancellationToken,
) -> Result<(), ProbekitError> {
    let mut program = probekit_registry::construct(name)?;
    info!(program = name, description = %program.describe(), "starting program");

    program.load().await?;

    if let Err(e) = program.watch_events().await {
        if let Err(unload_err) = program.unload().await {
            warn!(program = name, error = %unload_err, "unload after failed watch also failed");
        }
        return Err(e);
    }
    info!(program = name, "watching events");

    cancel.cancelled().await;
    info!(program = name, "shutting down");

    match tokio::time::timeout(timeout, program.unload()).await {
        Ok(result) => result?,
        Err(_) => return Err(ProbekitError::Timeout { duration: timeout }),
    }

    info!(program = name, "program unloaded");
    Ok(())
}
