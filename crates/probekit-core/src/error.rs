// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Probekit program registry and its programs.

use thiserror::Error;

use crate::types::{Operation, ProgramState};

/// The primary error type used by the registry, the `Program` trait, and the binary.
#[derive(Debug, Error)]
pub enum ProbekitError {
    /// A program was registered under an empty name.
    #[error("program name must not be empty")]
    InvalidName,

    /// A program is already registered under this name. The registry is unchanged.
    #[error("name already registered: {name}")]
    DuplicateName { name: String },

    /// No constructor is registered under this name.
    #[error("program {name:?} does not exist as a supported program")]
    ProgramNotFound { name: String },

    /// A program could not attach one of its probes.
    #[error("failed to attach probe {probe}: {message}")]
    ProbeAttach { probe: String, message: String },

    /// A program could not acquire its collection mechanism.
    #[error("failed to load program {program}: {source}")]
    Load {
        program: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A program could not start or keep running its event watcher.
    #[error("event watcher error in {program}: {message}")]
    Watch { program: String, message: String },

    /// A lifecycle operation was invoked from a state that does not allow it.
    #[error("cannot {operation} program {program} while it is {state}")]
    InvalidState {
        program: String,
        operation: Operation,
        state: ProgramState,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Configuration errors surfaced at runtime.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
