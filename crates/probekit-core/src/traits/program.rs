// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability contract every registered program implements.

use async_trait::async_trait;

use crate::error::ProbekitError;

/// A pluggable data-collection unit that can be constructed by name.
///
/// Handles are owned by whoever constructed them. The expected call order is
/// `load`, then optionally `watch_events`, then `unload`; see
/// [`ProgramState`](crate::types::ProgramState) for the exact preconditions.
/// Callers should `unload` a handle before dropping it so the event watcher
/// is stopped and its outcome reported.
#[async_trait]
pub trait Program: Send + Sync + 'static {
    /// Returns a human-readable identity for this program instance.
    fn describe(&self) -> String;

    /// Acquires and activates the collection mechanism.
    async fn load(&mut self) -> Result<(), ProbekitError>;

    /// Releases the collection mechanism and everything attached to it,
    /// stopping the event watcher if one is running.
    ///
    /// Waits as long as the watcher takes to exit; callers impose the deadline.
    async fn unload(&mut self) -> Result<(), ProbekitError>;

    /// Starts observing events on a background task and returns immediately.
    ///
    /// May be called once per successful `load`.
    async fn watch_events(&mut self) -> Result<(), ProbekitError>;
}

impl std::fmt::Debug for dyn Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Program").field(&self.describe()).finish()
    }
}
