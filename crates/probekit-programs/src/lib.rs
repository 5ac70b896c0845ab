// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in Probekit programs.
//!
//! Each program registers itself with the process-wide registry at link
//! time, so a binary that links this crate can construct any of them by name:
//!
//! - `heartbeat` - periodic sequence-numbered tick
//! - `loadavg` - samples `/proc/loadavg`

pub mod heartbeat;
pub mod loadavg;

pub use heartbeat::{HEARTBEAT_PROGRAM, HeartbeatProgram};
pub use loadavg::{LOADAVG_PROGRAM, LoadSample, LoadSampleError, LoadavgProgram};

/// Program selected when configuration names none.
pub const DEFAULT_PROGRAM: &str = HEARTBEAT_PROGRAM;

/// Names of the programs this crate registers.
pub const BUILTIN_PROGRAMS: &[&str] = &[HEARTBEAT_PROGRAM, LOADAVG_PROGRAM];
