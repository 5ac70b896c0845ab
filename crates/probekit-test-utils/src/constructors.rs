// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constructor closures for registry tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use probekit_core::{ProbekitError, ProgramHandle};

use crate::mock_program::MockProgram;

/// A constructor producing a fresh [`MockProgram`] that describes itself as `label`.
pub fn labelled_constructor(
    label: &str,
) -> impl Fn() -> Result<ProgramHandle, ProbekitError> + Send + Sync + 'static {
    let label = label.to_string();
    move || -> Result<ProgramHandle, ProbekitError> { Ok(Box::new(MockProgram::new(label.clone()))) }
}

/// Like [`labelled_constructor`], but also counts how many times it was invoked.
pub fn counting_constructor(
    label: &str,
) -> (
    impl Fn() -> Result<ProgramHandle, ProbekitError> + Send + Sync + 'static,
    Arc<AtomicUsize>,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let inner = labelled_constructor(label);

    let constructor = move || {
        counter.fetch_add(1, Ordering::SeqCst);
        inner()
    };
    (constructor, calls)
}

/// A constructor that always fails with [`ProbekitError::ProbeAttach`] and
/// counts its invocations.
pub fn failing_constructor(
    probe: &str,
    message: &str,
) -> (
    impl Fn() -> Result<ProgramHandle, ProbekitError> + Send + Sync + 'static,
    Arc<AtomicUsize>,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let probe = probe.to_string();
    let message = message.to_string();

    let constructor = move || -> Result<ProgramHandle, ProbekitError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(ProbekitError::ProbeAttach {
            probe: probe.clone(),
            message: message.clone(),
        })
    };
    (constructor, calls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_constructor_counts_each_call() {
        let (ctor, calls) = counting_constructor("A");
        assert_eq!(ctor().unwrap().describe(), "A");
        assert_eq!(ctor().unwrap().describe(), "A");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failing_constructor_reports_probe() {
        let (ctor, calls) = failing_constructor("uprobe/libc:malloc", "no such file");
        let err = ctor().err().unwrap();
        assert!(matches!(err, ProbekitError::ProbeAttach { ref probe, .. } if probe == "uprobe/libc:malloc"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
