// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background event-watching task with its own cancellation handle.
//!
//! Programs start an [`EventWatcher`] from `watch_events` and stop it from
//! `unload`. The watcher owns a [`CancellationToken`]; the spawned loop gets a
//! child token and is expected to return once it is cancelled.

use std::future::Future;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, warn};

use crate::error::ProbekitError;

/// A running event loop spawned on the tokio runtime.
///
/// Dropping the watcher cancels its token, so an abandoned handle never keeps
/// its loop alive. Only [`shutdown`](EventWatcher::shutdown) and
/// [`stop`](EventWatcher::stop) wait for the loop and report how it ended.
pub struct EventWatcher {
    program: String,
    cancel: CancellationToken,
    task: Option<JoinHandle<Result<(), ProbekitError>>>,
}

impl EventWatcher {
    /// Spawns `run` on the current tokio runtime.
    ///
    /// `run` receives a child cancellation token and should return `Ok(())`
    /// once it is cancelled, or an error if watching failed.
    pub fn spawn<F, Fut>(program: impl Into<String>, run: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), ProbekitError>> + Send + 'static,
    {
        let program = program.into();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(cancel.child_token()));
        debug!(program = %program, "event watcher started");

        Self {
            program,
            cancel,
            task: Some(task),
        }
    }

    /// Returns the token that stops this watcher when cancelled.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns true once the watcher loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Cancels the watcher and waits for its loop to exit, with no time limit.
    ///
    /// The caller bounds the wait. If this future is dropped before the loop
    /// exits, the task is aborted.
    pub async fn shutdown(mut self) -> Result<(), ProbekitError> {
        self.cancel.cancel();

        let Some(task) = self.task.take() else {
            return Ok(());
        };

        let outcome = AbortOnDropHandle::new(task).await;
        self.finish(outcome)
    }

    /// Cancels the watcher and waits up to `timeout` for its loop to exit.
    ///
    /// Returns the loop's own result, [`ProbekitError::Timeout`] if it did not
    /// exit in time (the task is then aborted), or
    /// [`ProbekitError::Internal`] if it panicked.
    pub async fn stop(mut self, timeout: Duration) -> Result<(), ProbekitError> {
        self.cancel.cancel();

        let Some(mut task) = self.task.take() else {
            return Ok(());
        };

        match tokio::time::timeout(timeout, &mut task).await {
            Ok(outcome) => self.finish(outcome),
            Err(_) => {
                warn!(
                    program = %self.program,
                    timeout_ms = timeout.as_millis() as u64,
                    "event watcher ignored cancellation, aborting"
                );
                task.abort();
                Err(ProbekitError::Timeout { duration: timeout })
            }
        }
    }

    fn finish(
        &self,
        outcome: Result<Result<(), ProbekitError>, JoinError>,
    ) -> Result<(), ProbekitError> {
        match outcome {
            Ok(result) => {
                debug!(program = %self.program, "event watcher stopped");
                result
            }
            Err(join_err) => Err(ProbekitError::Internal(format!(
                "event watcher for {} did not complete: {join_err}",
                self.program
            ))),
        }
    }
}

impl Drop for EventWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for EventWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventWatcher")
            .field("program", &self.program)
            .field("cancelled", &self.cancel.is_cancelled())
            .field("finished", &self.is_finished())
            .finish()
    }
}
