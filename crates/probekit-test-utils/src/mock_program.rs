// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock program for deterministic testing.
//!
//! `MockProgram` implements `Program` entirely in memory. It follows the real
//! lifecycle rules, records every call it receives, and emits synthetic
//! events from its watcher so tests can observe background activity.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use probekit_core::{EventWatcher, Operation, ProbekitError, Program, ProgramState};

/// Shared record of the lifecycle calls a mock received, in order.
pub type CallLog = Arc<Mutex<Vec<Operation>>>;

const EVENT_INTERVAL: Duration = Duration::from_millis(10);
const STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// A mock program for testing.
///
/// - **calls**: every `load`/`watch_events`/`unload` attempt, successful or not
/// - **events**: incremented by the watcher every 10ms while watching
pub struct MockProgram {
    label: String,
    state: ProgramState,
    calls: CallLog,
    events: Arc<AtomicU64>,
    load_failure: Option<String>,
    watch_failure: Option<String>,
    unload_delay: Option<Duration>,
    watcher: Option<EventWatcher>,
}

impl MockProgram {
    /// Create a mock whose `describe()` returns `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: ProgramState::Idle,
            calls: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(AtomicU64::new(0)),
            load_failure: None,
            watch_failure: None,
            unload_delay: None,
            watcher: None,
        }
    }

    /// Make every `load()` fail with a [`ProbekitError::Load`] carrying `message`.
    pub fn with_load_failure(mut self, message: impl Into<String>) -> Self {
        self.load_failure = Some(message.into());
        self
    }

    /// Make every valid `watch_events()` fail with a [`ProbekitError::Watch`]
    /// carrying `message`. The program stays loaded.
    pub fn with_watch_failure(mut self, message: impl Into<String>) -> Self {
        self.watch_failure = Some(message.into());
        self
    }

    /// Make every `unload()` sleep for `delay` before releasing anything.
    pub fn with_unload_delay(mut self, delay: Duration) -> Self {
        self.unload_delay = Some(delay);
        self
    }

    /// Record calls into `log` instead of a fresh one, so a constructor can
    /// hand every mock it builds the same log.
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.calls = log;
        self
    }

    /// Handle to the call log; stays valid after the mock is boxed.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    /// Handle to the synthetic event counter.
    pub fn event_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.events)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProgramState {
        self.state
    }

    async fn record(&self, operation: Operation) {
        self.calls.lock().await.push(operation);
    }
}

#[async_trait]
impl Program for MockProgram {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn load(&mut self) -> Result<(), ProbekitError> {
        self.record(Operation::Load).await;
        let next = self.state.transition(&self.label, Operation::Load)?;

        if let Some(message) = &self.load_failure {
            return Err(ProbekitError::Load {
                program: self.label.clone(),
                source: Box::new(std::io::Error::other(message.clone())),
            });
        }

        self.state = next;
        Ok(())
    }

    async fn unload(&mut self) -> Result<(), ProbekitError> {
        self.record(Operation::Unload).await;
        let next = self.state.transition(&self.label, Operation::Unload)?;
        if let Some(delay) = self.unload_delay {
            tokio::time::sleep(delay).await;
        }
        self.state = next;

        match self.watcher.take() {
            Some(watcher) => watcher.stop(STOP_TIMEOUT).await,
            None => Ok(()),
        }
    }

    async fn watch_events(&mut self) -> Result<(), ProbekitError> {
        self.record(Operation::WatchEvents).await;
        let next = self.state.transition(&self.label, Operation::WatchEvents)?;

        if let Some(message) = &self.watch_failure {
            return Err(ProbekitError::Watch {
                program: self.label.clone(),
                message: message.clone(),
            });
        }

        let events = Arc::clone(&self.events);
        self.watcher = Some(EventWatcher::spawn(self.label.clone(), move |cancel| async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(EVENT_INTERVAL) => {
                        events.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
        }));
        self.state = next;
        Ok(())
    }
}
