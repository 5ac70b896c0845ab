// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `probekit list` and `probekit describe` command implementations.

use probekit_core::ProbekitError;
use probekit_programs::BUILTIN_PROGRAMS;

/// Registered program names, sorted for stable output.
pub fn program_names() -> Vec<String> {
    let mut names = probekit_registry::list_names();
    names.sort();
    names
}

/// Print one registered program per line, marking the built-ins.
pub fn list_programs() {
    for name in program_names() {
        if BUILTIN_PROGRAMS.contains(&name.as_str()) {
            println!("{name} (built-in)");
        } else {
            println!("{name}");
        }
    }
}

/// Construct `name` and return its self-description.
pub fn describe_program(name: &str) -> Result<String, ProbekitError> {
    Ok(probekit_registry::construct(name)?.describe())
}
