// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in programs are reachable through the process-wide registry.

use std::time::Duration;

use probekit_core::ProbekitError;
use probekit_programs::{BUILTIN_PROGRAMS, DEFAULT_PROGRAM, HEARTBEAT_PROGRAM, LOADAVG_PROGRAM};

#[test]
fn builtins_self_register() {
    let names = probekit_registry::list_names();
    for builtin in BUILTIN_PROGRAMS {
        assert!(
            names.iter().any(|n| n == builtin),
            "{builtin} missing from {names:?}"
        );
    }
}

#[test]
fn default_program_is_registered() {
    assert!(probekit_registry::global().contains(DEFAULT_PROGRAM));
}

#[test]
fn builtins_cannot_be_replaced() {
    let err = probekit_registry::register(HEARTBEAT_PROGRAM, probekit_programs::LoadavgProgram::boxed)
        .unwrap_err();
    assert!(matches!(err, ProbekitError::DuplicateName { .. }));
}

#[test]
fn constructed_builtins_describe_themselves() {
    let heartbeat = probekit_registry::construct(HEARTBEAT_PROGRAM).unwrap();
    assert!(heartbeat.describe().starts_with("heartbeat"));

    let loadavg = probekit_registry::construct(LOADAVG_PROGRAM).unwrap();
    assert!(loadavg.describe().starts_with("loadavg (/proc/loadavg"));
}

#[tokio::test(start_paused = true)]
async fn heartbeat_runs_through_registry_handle() {
    let mut handle = probekit_registry::construct(HEARTBEAT_PROGRAM).unwrap();
    handle.load().await.unwrap();
    handle.watch_events().await.unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    handle.unload().await.unwrap();
}
