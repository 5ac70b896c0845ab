// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by registered programs.
//!
//! Programs use `#[async_trait]` so they can be stored and driven as
//! `Box<dyn Program>`.

pub mod program;

pub use program::Program;
