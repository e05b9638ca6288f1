// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Access control — single-admin authorisation and the global pause flag.
//!
//! Four operations only:
//!
//! * [`is_admin`](crate::engine::ComplianceEngine::is_admin)  — pure comparison against the stored admin
//! * [`set_admin`](crate::engine::ComplianceEngine::set_admin) — replace the admin (admin-only)
//! * [`pause`](crate::engine::ComplianceEngine::pause) / [`unpause`](crate::engine::ComplianceEngine::unpause) — toggle the pause flag (admin-only)
//!
//! The pause flag gates rule creation and verification but **not** standard
//! creation and **not** rule deactivation.  The first asymmetry is preserved
//! from the original protocol rather than fixed; the second keeps the
//! administrative safety action available while paused.

use crate::error::ComplianceError;
use crate::storage::Storage;

impl<S: Storage> crate::engine::ComplianceEngine<S> {
    /// Whether `caller` is the current admin.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agrigate_compliance_core::{
    ///     config::EngineConfig,
    ///     engine::ComplianceEngine,
    ///     storage::InMemoryStorage,
    /// };
    ///
    /// let engine = ComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin");
    /// assert!(engine.is_admin("admin"));
    /// assert!(!engine.is_admin("mallory"));
    /// ```
    pub fn is_admin(&self, caller: &str) -> bool {
        // No stored record means no-one is admin; the empty-string default
        // must never grant authority.
        self.storage()
            .get_admin_state()
            .is_some_and(|state| state.admin == caller)
    }

    /// Identity of the current admin.
    pub fn get_admin(&self) -> alloc::string::String {
        self.state().admin
    }

    /// Whether the engine is currently paused.
    pub fn is_paused(&self) -> bool {
        self.state().paused
    }

    /// Replace the admin identity.
    ///
    /// # Errors
    ///
    /// [`ComplianceError::Unauthorized`] unless `caller` is the current
    /// admin.  On failure nothing changes.
    pub fn set_admin(&mut self, caller: &str, new_admin: &str) -> Result<(), ComplianceError> {
        let mut state = self
            .storage()
            .get_admin_state()
            .ok_or(ComplianceError::Unauthorized)?;
        if state.admin != caller {
            return Err(ComplianceError::Unauthorized);
        }
        state.admin = new_admin.into();
        self.storage_mut().set_admin_state(state);
        Ok(())
    }

    /// Raise the global pause flag.
    ///
    /// While paused, rule creation and verification fail with
    /// [`ComplianceError::Paused`]; standard creation and rule deactivation
    /// remain available.
    ///
    /// # Errors
    ///
    /// [`ComplianceError::Unauthorized`] unless `caller` is the current admin.
    pub fn pause(&mut self, caller: &str) -> Result<(), ComplianceError> {
        self.set_paused(caller, true)
    }

    /// Clear the global pause flag.
    ///
    /// # Errors
    ///
    /// [`ComplianceError::Unauthorized`] unless `caller` is the current admin.
    pub fn unpause(&mut self, caller: &str) -> Result<(), ComplianceError> {
        self.set_paused(caller, false)
    }

    fn set_paused(&mut self, caller: &str, paused: bool) -> Result<(), ComplianceError> {
        let mut state = self
            .storage()
            .get_admin_state()
            .ok_or(ComplianceError::Unauthorized)?;
        if state.admin != caller {
            return Err(ComplianceError::Unauthorized);
        }
        state.paused = paused;
        self.storage_mut().set_admin_state(state);
        Ok(())
    }
}
