// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Standard catalog — the append-only registry of regulatory standards.
//!
//! Two operations only:
//!
//! * [`add_standard`](crate::engine::ComplianceEngine::add_standard) — register a new standard (admin-only)
//! * [`get_standard`](crate::engine::ComplianceEngine::get_standard) — retrieve a standard by id
//!
//! There is no update and no delete: a standard, once registered, is
//! immutable and permanent.  Standard creation is intentionally **not**
//! gated by the pause flag.

use crate::error::ComplianceError;
use crate::storage::Storage;
use crate::types::Standard;

impl<S: Storage> crate::engine::ComplianceEngine<S> {
    /// Register a new regulatory standard.
    ///
    /// # Errors
    ///
    /// * [`ComplianceError::Unauthorized`] unless `caller` is the current admin.
    /// * [`ComplianceError::AlreadyExists`] if `id` is already registered —
    ///   the stored standard is never overwritten.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agrigate_compliance_core::{
    ///     config::EngineConfig,
    ///     engine::ComplianceEngine,
    ///     error::ComplianceError,
    ///     storage::InMemoryStorage,
    /// };
    ///
    /// let mut engine = ComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin");
    /// engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
    ///
    /// assert_eq!(
    ///     engine.add_standard("admin", 1, "duplicate", "ignored"),
    ///     Err(ComplianceError::AlreadyExists)
    /// );
    /// ```
    pub fn add_standard(
        &mut self,
        caller: &str,
        id: u32,
        name: &str,
        description: &str,
    ) -> Result<(), ComplianceError> {
        if !self.is_admin(caller) {
            return Err(ComplianceError::Unauthorized);
        }
        if self.storage().get_standard(id).is_some() {
            return Err(ComplianceError::AlreadyExists);
        }
        self.storage_mut().set_standard(Standard {
            id,
            name: name.into(),
            description: description.into(),
        });
        Ok(())
    }

    /// Retrieve the standard with `id`, or `None` when absent.
    pub fn get_standard(&self, id: u32) -> Option<Standard> {
        self.storage().get_standard(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::engine::ComplianceEngine;
    use crate::error::ComplianceError;
    use crate::storage::InMemoryStorage;

    fn engine() -> ComplianceEngine<InMemoryStorage> {
        ComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin")
    }

    #[test]
    fn duplicate_id_never_overwrites() {
        let mut engine = engine();
        engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();

        let err = engine.add_standard("admin", 1, "other", "other").unwrap_err();
        assert_eq!(err, ComplianceError::AlreadyExists);

        let stored = engine.get_standard(1).unwrap();
        assert_eq!(stored.name, "EU-GMO-2024");
        assert_eq!(stored.description, "thresholds");
    }

    #[test]
    fn lookup_of_absent_standard_is_none() {
        let engine = engine();
        assert!(engine.get_standard(404).is_none());
    }
}
