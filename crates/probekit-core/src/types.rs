// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handle, constructor, and lifecycle types shared by the registry and programs.

use std::sync::Arc;

use strum::{Display, EnumString};

use crate::error::ProbekitError;
use crate::traits::Program;

/// A live, caller-owned program instance.
pub type ProgramHandle = Box<dyn Program>;

/// A zero-argument factory producing a fresh program handle or a failure.
pub type ProgramConstructor =
    Arc<dyn Fn() -> Result<ProgramHandle, ProbekitError> + Send + Sync + 'static>;

/// Lifecycle operations a caller can invoke on a program handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Load,
    WatchEvents,
    Unload,
}

/// Where a program handle is in its lifecycle.
///
/// A freshly constructed handle starts in [`Idle`](ProgramState::Idle).
/// Allowed transitions:
///
/// | from | `load` | `watch_events` | `unload` |
/// |---|---|---|---|
/// | `Idle` | `Loaded` | error | `Idle` |
/// | `Loaded` | error | `Watching` | `Unloaded` |
/// | `Watching` | error | error | `Unloaded` |
/// | `Unloaded` | `Loaded` | error | `Unloaded` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProgramState {
    #[default]
    Idle,
    Loaded,
    Watching,
    Unloaded,
}

impl ProgramState {
    /// Compute the state reached by applying `operation`, or the error a program
    /// named `program` should report when the operation is not allowed.
    pub fn transition(self, program: &str, operation: Operation) -> Result<Self, ProbekitError> {
        use Operation::*;
        use ProgramState::*;

        match (self, operation) {
            (Idle | Unloaded, Load) => Ok(Loaded),
            (Loaded, WatchEvents) => Ok(Watching),
            (Loaded | Watching, Unload) => Ok(Unloaded),
            // Unloading something that holds nothing is a no-op.
            (Idle, Unload) => Ok(Idle),
            (Unloaded, Unload) => Ok(Unloaded),
            (state, operation) => Err(ProbekitError::InvalidState {
                program: program.to_string(),
                operation,
                state,
            }),
        }
    }

    /// Returns true while the program holds its collection mechanism.
    pub fn is_loaded(self) -> bool {
        matches!(self, ProgramState::Loaded | ProgramState::Watching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_then_watch_then_unload() {
        let state = ProgramState::default();
        let state = state.transition("p", Operation::Load).unwrap();
        assert_eq!(state, ProgramState::Loaded);
        let state = state.transition("p", Operation::WatchEvents).unwrap();
        assert_eq!(state, ProgramState::Watching);
        let state = state.transition("p", Operation::Unload).unwrap();
        assert_eq!(state, ProgramState::Unloaded);
    }

    #[test]
    fn reload_after_unload_is_allowed() {
        let state = ProgramState::Unloaded
            .transition("p", Operation::Load)
            .unwrap();
        assert_eq!(state, ProgramState::Loaded);
    }

    #[test]
    fn watch_twice_is_rejected() {
        let err = ProgramState::Watching
            .transition("p", Operation::WatchEvents)
            .unwrap_err();
        match err {
            ProbekitError::InvalidState {
                program,
                operation,
                state,
            } => {
                assert_eq!(program, "p");
                assert_eq!(operation, Operation::WatchEvents);
                assert_eq!(state, ProgramState::Watching);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn watch_before_load_is_rejected() {
        assert!(ProgramState::Idle
            .transition("p", Operation::WatchEvents)
            .is_err());
        assert!(ProgramState::Unloaded
            .transition("p", Operation::WatchEvents)
            .is_err());
    }

    #[test]
    fn double_load_is_rejected() {
        assert!(ProgramState::Loaded.transition("p", Operation::Load).is_err());
        assert!(ProgramState::Watching.transition("p", Operation::Load).is_err());
    }

    #[test]
    fn unload_without_load_is_noop() {
        assert_eq!(
            ProgramState::Idle.transition("p", Operation::Unload).unwrap(),
            ProgramState::Idle
        );
        assert_eq!(
            ProgramState::Unloaded
                .transition("p", Operation::Unload)
                .unwrap(),
            ProgramState::Unloaded
        );
    }

    #[test]
    fn invalid_state_message_names_operation_and_state() {
        let err = ProgramState::Idle
            .transition("heartbeat", Operation::WatchEvents)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot watch_events program heartbeat while it is idle"
        );
    }

    #[test]
    fn is_loaded_covers_loaded_and_watching() {
        assert!(!ProgramState::Idle.is_loaded());
        assert!(ProgramState::Loaded.is_loaded());
        assert!(ProgramState::Watching.is_loaded());
        assert!(!ProgramState::Unloaded.is_loaded());
    }
}
