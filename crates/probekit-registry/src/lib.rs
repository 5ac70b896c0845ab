// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Program registry for Probekit.
//!
//! Programs register a zero-argument constructor under a unique name and are
//! constructed on demand by name. [`ProgramRegistry`] is the registry itself;
//! [`global`] exposes the process-wide instance that self-registering program
//! crates populate through [`register_program!`].

pub mod global;
pub mod registry;

pub use global::{ProgramRegistration, construct, global, list_names, register};
pub use registry::ProgramRegistry;

#[doc(hidden)]
pub use inventory;

/// Registers a program with the process-wide registry at link time.
///
/// ```ignore
/// probekit_registry::register_program!("heartbeat", HeartbeatProgram::boxed);
/// ```
///
/// The constructor must be a `fn() -> Result<ProgramHandle, ProbekitError>`.
#[macro_export]
macro_rules! register_program {
    ($name:expr, $constructor:expr $(,)?) => {
        $crate::inventory::submit! {
            $crate::ProgramRegistration::new($name, $constructor)
        }
    };
}
