// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide registry and static self-registration.
//!
//! Program crates submit a [`ProgramRegistration`] with `inventory` (usually
//! through [`register_program!`](crate::register_program)). The global
//! registry is created on first access and seeded from every submission
//! linked into the binary, so registration order across crates is irrelevant.

use std::sync::LazyLock;

use probekit_core::{ProbekitError, ProgramHandle};
use tracing::{debug, warn};

use crate::registry::ProgramRegistry;

/// A static self-registration record for one program.
pub struct ProgramRegistration {
    /// Unique program name.
    pub name: &'static str,
    /// Zero-argument constructor for a fresh handle.
    pub constructor: fn() -> Result<ProgramHandle, ProbekitError>,
}

impl ProgramRegistration {
    /// Pairs `name` with its constructor; usable in `inventory::submit!`.
    pub const fn new(
        name: &'static str,
        constructor: fn() -> Result<ProgramHandle, ProbekitError>,
    ) -> Self {
        Self { name, constructor }
    }
}

inventory::collect!(ProgramRegistration);

static GLOBAL: LazyLock<ProgramRegistry> = LazyLock::new(|| {
    let registry = ProgramRegistry::new();
    seed_from_submissions(&registry);
    registry
});

/// Returns the process-wide registry, seeding it from static submissions on
/// first access.
pub fn global() -> &'static ProgramRegistry {
    &GLOBAL
}

/// Register a program with the process-wide registry at runtime.
pub fn register<F>(name: impl Into<String>, constructor: F) -> Result<(), ProbekitError>
where
    F: Fn() -> Result<ProgramHandle, ProbekitError> + Send + Sync + 'static,
{
    global().register(name, constructor)
}

/// Construct a program by name from the process-wide registry.
pub fn construct(name: &str) -> Result<ProgramHandle, ProbekitError> {
    global().construct(name)
}

/// Snapshot of every name in the process-wide registry.
pub fn list_names() -> Vec<String> {
    global().list_names()
}

fn seed_from_submissions(registry: &ProgramRegistry) {
    for submission in inventory::iter::<ProgramRegistration> {
        match registry.register(submission.name, submission.constructor) {
            Ok(()) => debug!(program = submission.name, "registered program"),
            // First submission wins.
            Err(e) => warn!(
                program = submission.name,
                error = %e,
                "ignoring static program registration"
            ),
        }
    }
}
