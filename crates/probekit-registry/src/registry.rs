// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name-to-constructor registry for Probekit programs.
//!
//! The `ProgramRegistry` stores one zero-argument constructor per unique
//! program name. Entries are write-once: there is no overwrite and no
//! unregister. Constructing a program invokes its constructor afresh on every
//! call and hands the new instance to the caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use probekit_core::{ProbekitError, ProgramConstructor, ProgramHandle};

/// Registry of program constructors keyed by unique name.
///
/// A single mutex guards both registration and lookup. Constructors run
/// outside the lock, so a constructor may itself use the registry.
pub struct ProgramRegistry {
    entries: Mutex<HashMap<String, ProgramConstructor>>,
}

impl ProgramRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register `constructor` under `name`.
    ///
    /// Fails with [`ProbekitError::InvalidName`] for an empty name and with
    /// [`ProbekitError::DuplicateName`] if the name is taken. On failure the
    /// registry is unchanged and `constructor` is dropped without being called.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F) -> Result<(), ProbekitError>
    where
        F: Fn() -> Result<ProgramHandle, ProbekitError> + Send + Sync + 'static,
    {
        self.register_constructor(name, Arc::new(constructor))
    }

    /// Register an already shared constructor under `name`.
    pub fn register_constructor(
        &self,
        name: impl Into<String>,
        constructor: ProgramConstructor,
    ) -> Result<(), ProbekitError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProbekitError::InvalidName);
        }

        let mut entries = self.lock();
        if entries.contains_key(&name) {
            return Err(ProbekitError::DuplicateName { name });
        }
        entries.insert(name, constructor);
        Ok(())
    }

    /// Construct a fresh instance of the program registered under `name`.
    ///
    /// Invokes the stored constructor exactly once and returns its result
    /// unchanged, including any error it produces. Unknown names fail with
    /// [`ProbekitError::ProgramNotFound`] without invoking anything.
    pub fn construct(&self, name: &str) -> Result<ProgramHandle, ProbekitError> {
        let constructor = self
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| ProbekitError::ProgramNotFound {
                name: name.to_string(),
            })?;

        constructor()
    }

    /// Snapshot of all registered names, in no particular order.
    pub fn list_names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Returns true if a constructor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Returns the number of registered programs.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no programs are registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // No operation leaves the map half-updated, so a poisoned lock still
    // guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, ProgramConstructor>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgramRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgramRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.list_names();
        names.sort();
        f.debug_struct("ProgramRegistry")
            .field("names", &names)
            .finish()
    }
}
