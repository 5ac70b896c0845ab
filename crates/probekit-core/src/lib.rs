// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Probekit program registry.
//!
//! This crate provides the `Program` capability trait, the shared error type,
//! the lifecycle state machine, and the background event watcher used by
//! concrete programs. The registry and every program depend on it.

pub mod error;
pub mod traits;
pub mod types;
pub mod watch;

// Re-export key items at crate root for ergonomic imports.
pub use error::ProbekitError;
pub use traits::Program;
pub use types::{Operation, ProgramConstructor, ProgramHandle, ProgramState};
pub use watch::EventWatcher;
