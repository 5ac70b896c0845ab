// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heartbeat program: a sequence-numbered tick on a fixed interval.
//!
//! Useful as a liveness signal for the collection pipeline and as the default
//! program when nothing else is configured. It attaches nothing, so `load`
//! only moves the lifecycle forward.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use probekit_core::{EventWatcher, Operation, ProbekitError, Program, ProgramHandle, ProgramState};

/// Registry name of the heartbeat program.
pub const HEARTBEAT_PROGRAM: &str = "heartbeat";

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Emits one heartbeat event per interval while watching.
pub struct HeartbeatProgram {
    interval: Duration,
    state: ProgramState,
    beats: Arc<AtomicU64>,
    watcher: Option<EventWatcher>,
}

impl HeartbeatProgram {
    /// Heartbeat that ticks once a second.
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_INTERVAL)
    }

    /// Heartbeat that ticks every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            state: ProgramState::Idle,
            beats: Arc::new(AtomicU64::new(0)),
            watcher: None,
        }
    }

    /// Registry constructor.
    pub fn boxed() -> Result<ProgramHandle, ProbekitError> {
        Ok(Box::new(Self::new()))
    }

    /// Number of heartbeats emitted so far.
    pub fn beats(&self) -> u64 {
        self.beats.load(Ordering::Relaxed)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProgramState {
        self.state
    }
}

impl Default for HeartbeatProgram {
    fn default() -> Self {
        Self::new()
    }
}

probekit_registry::register_program!(HEARTBEAT_PROGRAM, HeartbeatProgram::boxed);

#[async_trait]
impl Program for HeartbeatProgram {
    fn describe(&self) -> String {
        format!("{HEARTBEAT_PROGRAM} (every {:?})", self.interval)
    }

    async fn load(&mut self) -> Result<(), ProbekitError> {
        self.state = self.state.transition(HEARTBEAT_PROGRAM, Operation::Load)?;
        info!(program = HEARTBEAT_PROGRAM, "heartbeat program loaded");
        Ok(())
    }

    async fn unload(&mut self) -> Result<(), ProbekitError> {
        self.state = self
            .state
            .transition(HEARTBEAT_PROGRAM, Operation::Unload)?;

        let result = match self.watcher.take() {
            Some(watcher) => watcher.shutdown().await,
            None => Ok(()),
        };
        info!(program = HEARTBEAT_PROGRAM, beats = self.beats(), "heartbeat program unloaded");
        result
    }

    async fn watch_events(&mut self) -> Result<(), ProbekitError> {
        let next = self
            .state
            .transition(HEARTBEAT_PROGRAM, Operation::WatchEvents)?;

        let beats = Arc::clone(&self.beats);
        let period = self.interval;
        self.watcher = Some(EventWatcher::spawn(HEARTBEAT_PROGRAM, move |cancel| async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    _ = ticker.tick() => {
                        let seq = beats.fetch_add(1, Ordering::Relaxed) + 1;
                        debug!(program = HEARTBEAT_PROGRAM, seq, "heartbeat");
                    }
                }
            }
        }));
        self.state = next;
        Ok(())
    }
}
