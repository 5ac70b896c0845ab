// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Probekit.
//!
//! Provides a mock program and constructor helpers for fast, deterministic
//! registry and lifecycle tests without touching kernel or OS facilities.
//!
//! # Components
//!
//! - [`MockProgram`] - In-memory program that records every lifecycle call
//! - [`labelled_constructor`], [`counting_constructor`], [`failing_constructor`] -
//!   constructor closures for registry tests

pub mod constructors;
pub mod mock_program;

pub use constructors::{counting_constructor, failing_constructor, labelled_constructor};
pub use mock_program::{CallLog, MockProgram};
