// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Load-average program backed by `/proc/loadavg`.
//!
//! `load` checks the source is readable and parses the first sample; the
//! watcher then samples it on a fixed interval and logs each reading.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use probekit_core::{EventWatcher, Operation, ProbekitError, Program, ProgramHandle, ProgramState};

/// Registry name of the load-average program.
pub const LOADAVG_PROGRAM: &str = "loadavg";

const DEFAULT_SOURCE: &str = "/proc/loadavg";
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// One reading of the kernel's load-average line.
///
/// The line looks like `0.20 0.18 0.12 1/80 11206`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSample {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
    pub runnable: u32,
    pub total: u32,
    pub last_pid: u32,
}

/// Why a load-average line could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadSampleError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value {value:?} for field `{field}`")]
    InvalidValue { field: &'static str, value: String },
}

fn parse_field<T: FromStr>(value: Option<&str>, field: &'static str) -> Result<T, LoadSampleError> {
    let value = value.ok_or(LoadSampleError::MissingField(field))?;
    value.parse().map_err(|_| LoadSampleError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

impl FromStr for LoadSample {
    type Err = LoadSampleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();
        let one = parse_field(fields.next(), "one")?;
        let five = parse_field(fields.next(), "five")?;
        let fifteen = parse_field(fields.next(), "fifteen")?;

        let tasks = fields.next().ok_or(LoadSampleError::MissingField("tasks"))?;
        let (runnable, total) = tasks.split_once('/').ok_or_else(|| LoadSampleError::InvalidValue {
            field: "tasks",
            value: tasks.to_string(),
        })?;
        let runnable = parse_field(Some(runnable), "runnable")?;
        let total = parse_field(Some(total), "total")?;
        let last_pid = parse_field(fields.next(), "last_pid")?;

        Ok(Self {
            one,
            five,
            fifteen,
            runnable,
            total,
            last_pid,
        })
    }
}

async fn read_sample(source: &Path) -> Result<LoadSample, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(source).await?;
    Ok(content.trim().parse::<LoadSample>()?)
}

/// Samples the system load average while watching.
pub struct LoadavgProgram {
    source: PathBuf,
    interval: Duration,
    state: ProgramState,
    latest: Arc<Mutex<Option<LoadSample>>>,
    samples: Arc<AtomicU64>,
    watcher: Option<EventWatcher>,
}

impl LoadavgProgram {
    /// Samples `/proc/loadavg` every five seconds.
    pub fn new() -> Self {
        Self::with_source(DEFAULT_SOURCE, DEFAULT_INTERVAL)
    }

    /// Read samples from `source` every `interval` instead of the defaults.
    pub fn with_source(source: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            source: source.into(),
            interval,
            state: ProgramState::Idle,
            latest: Arc::new(Mutex::new(None)),
            samples: Arc::new(AtomicU64::new(0)),
            watcher: None,
        }
    }

    /// Registry constructor.
    pub fn boxed() -> Result<ProgramHandle, ProbekitError> {
        Ok(Box::new(Self::new()))
    }

    /// Most recent successfully parsed sample.
    pub fn latest(&self) -> Option<LoadSample> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of samples taken since construction, including the one taken by `load`.
    pub fn samples(&self) -> u64 {
        self.samples.load(Ordering::Relaxed)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProgramState {
        self.state
    }
}

impl Default for LoadavgProgram {
    fn default() -> Self {
        Self::new()
    }
}

fn store(latest: &Mutex<Option<LoadSample>>, samples: &AtomicU64, sample: LoadSample) {
    *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(sample);
    samples.fetch_add(1, Ordering::Relaxed);
}

probekit_registry::register_program!(LOADAVG_PROGRAM, LoadavgProgram::boxed);

#[async_trait]
impl Program for LoadavgProgram {
    fn describe(&self) -> String {
        format!("{LOADAVG_PROGRAM} ({} every {:?})", self.source.display(), self.interval)
    }

    async fn load(&mut self) -> Result<(), ProbekitError> {
        let next = self.state.transition(LOADAVG_PROGRAM, Operation::Load)?;

        let sample = read_sample(&self.source)
            .await
            .map_err(|source| ProbekitError::Load {
                program: LOADAVG_PROGRAM.to_string(),
                source,
            })?;
        store(&self.latest, &self.samples, sample);

        self.state = next;
        info!(
            program = LOADAVG_PROGRAM,
            source = %self.source.display(),
            "loadavg program loaded"
        );
        Ok(())
    }

    async fn unload(&mut self) -> Result<(), ProbekitError> {
        self.state = self.state.transition(LOADAVG_PROGRAM, Operation::Unload)?;

        let result = match self.watcher.take() {
            Some(watcher) => watcher.shutdown().await,
            None => Ok(()),
        };
        info!(program = LOADAVG_PROGRAM, samples = self.samples(), "loadavg program unloaded");
        result
    }

    async fn watch_events(&mut self) -> Result<(), ProbekitError> {
        let next = self
            .state
            .transition(LOADAVG_PROGRAM, Operation::WatchEvents)?;

        let source = self.source.clone();
        let period = self.interval;
        let latest = Arc::clone(&self.latest);
        let samples = Arc::clone(&self.samples);

        self.watcher = Some(EventWatcher::spawn(LOADAVG_PROGRAM, move |cancel| async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // `load` already took the first sample.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    _ = ticker.tick() => {}
                }

                let content = match tokio::fs::read_to_string(&source).await {
                    Ok(content) => content,
                    Err(e) => {
                        return Err(ProbekitError::Watch {
                            program: LOADAVG_PROGRAM.to_string(),
                            message: format!("failed to read {}: {e}", source.display()),
                        });
                    }
                };

                match content.trim().parse::<LoadSample>() {
                    Ok(sample) => {
                        debug!(
                            program = LOADAVG_PROGRAM,
                            one = sample.one,
                            five = sample.five,
                            fifteen = sample.fifteen,
                            runnable = sample.runnable,
                            total = sample.total,
                            "load sample"
                        );
                        store(&latest, &samples, sample);
                    }
                    Err(e) => warn!(program = LOADAVG_PROGRAM, error = %e, "skipping malformed load sample"),
                }
            }
        }));
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn loadavg_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    async fn wait_for_samples(program: &LoadavgProgram, at_least: u64) {
        for _ in 0..200 {
            if program.samples() >= at_least {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("expected {at_least} samples, got {}", program.samples());
    }

    #[test]
    fn parses_kernel_line() {
        let sample: LoadSample = "0.20 0.18 0.12 1/80 11206".parse().unwrap();
        assert_eq!(
            sample,
            LoadSample {
                one: 0.20,
                five: 0.18,
                fifteen: 0.12,
                runnable: 1,
                total: 80,
                last_pid: 11206,
            }
        );
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            "0.20 0.18".parse::<LoadSample>().unwrap_err(),
            LoadSampleError::MissingField("fifteen")
        );
        assert_eq!(
            "0.20 0.18 0.12 1/80".parse::<LoadSample>().unwrap_err(),
            LoadSampleError::MissingField("last_pid")
        );
    }

    #[test]
    fn rejects_malformed_tasks() {
        let err = "0.20 0.18 0.12 80 11206".parse::<LoadSample>().unwrap_err();
        assert_eq!(
            err,
            LoadSampleError::InvalidValue {
                field: "tasks",
                value: "80".into()
            }
        );
    }

    #[test]
    fn rejects_non_numeric_load() {
        let err = "high 0.18 0.12 1/80 11206".parse::<LoadSample>().unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"high\" for field `one`");
    }

    #[tokio::test]
    async fn load_reads_first_sample() {
        let file = loadavg_file("1.50 1.00 0.50 2/100 4242\n");
        let mut program = LoadavgProgram::with_source(file.path(), Duration::from_millis(10));

        program.load().await.unwrap();
        assert_eq!(program.state(), ProgramState::Loaded);
        assert_eq!(program.samples(), 1);
        assert_eq!(program.latest().map(|s| s.last_pid), Some(4242));
    }

    #[tokio::test]
    async fn load_fails_for_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut program =
            LoadavgProgram::with_source(dir.path().join("absent"), Duration::from_millis(10));

        let err = program.load().await.unwrap_err();
        assert!(matches!(err, ProbekitError::Load { ref program, .. } if program == LOADAVG_PROGRAM));
        assert_eq!(program.state(), ProgramState::Idle);
    }

    #[tokio::test]
    async fn load_fails_for_malformed_source() {
        let file = loadavg_file("not a load line");
        let mut program = LoadavgProgram::with_source(file.path(), Duration::from_millis(10));

        let err = program.load().await.unwrap_err();
        assert!(err.to_string().contains("invalid value"));
    }

    #[tokio::test]
    async fn watcher_picks_up_new_samples() {
        let file = loadavg_file("0.10 0.10 0.10 1/10 100\n");
        let mut program = LoadavgProgram::with_source(file.path(), Duration::from_millis(10));

        program.load().await.unwrap();
        std::fs::write(file.path(), "3.00 2.00 1.00 5/50 200\n").unwrap();
        program.watch_events().await.unwrap();

        wait_for_samples(&program, 2).await;
        program.unload().await.unwrap();

        assert_eq!(program.latest().map(|s| s.runnable), Some(5));
        assert_eq!(program.state(), ProgramState::Unloaded);
    }

    #[tokio::test]
    async fn watcher_error_surfaces_on_unload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loadavg");
        std::fs::write(&path, "0.10 0.10 0.10 1/10 100\n").unwrap();

        let mut program = LoadavgProgram::with_source(&path, Duration::from_millis(10));
        program.load().await.unwrap();
        std::fs::remove_file(&path).unwrap();
        program.watch_events().await.unwrap();

        // Give the watcher a couple of ticks to notice the file is gone.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let err = program.unload().await.unwrap_err();
        assert!(matches!(err, ProbekitError::Watch { .. }));
    }
}
