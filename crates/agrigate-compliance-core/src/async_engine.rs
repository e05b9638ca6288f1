// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Async compliance engine backed by Tokio.
//!
//! This module is only compiled when the `async` feature flag is enabled:
//!
//! ```toml
//! [dependencies]
//! agrigate-compliance-core = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Design
//!
//! [`AsyncComplianceEngine`] wraps the whole sync engine in **one**
//! [`tokio::sync::RwLock`].  The engine's state is a single atomic unit —
//! rule validation must observe catalog writes, and verification writes
//! three records plus a counter in one transition — so a single exclusive
//! lock over the full state is the correct discipline.  Read accessors
//! acquire a shared read lock; every mutating call acquires the write lock
//! for its full duration, so no task can observe an in-flight mutation.
//!
//! The evaluation pipeline is exactly the sync
//! [`ComplianceEngine`](crate::engine::ComplianceEngine) pipeline; this
//! wrapper adds scheduling, nothing else.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # {
//! use agrigate_compliance_core::{
//!     async_engine::AsyncComplianceEngine,
//!     config::EngineConfig,
//!     storage::InMemoryStorage,
//!     types::Submission,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine =
//!         AsyncComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin");
//!
//!     engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").await.unwrap();
//!     engine.add_numerical_rule("admin", 1, 1, "residue ppm", 0, 100).await.unwrap();
//!
//!     let submission = Submission {
//!         numeric_value: 50,
//!         category: "BT".into(),
//!         duration: 500,
//!         data_hash: [0u8; 32],
//!     };
//!     let record = engine
//!         .verify_compliance("monitor", "crop-001", 1, &submission, 42)
//!         .await
//!         .unwrap();
//!     assert!(record.passed);
//! }
//! # }
//! ```

#![cfg(feature = "async")]

use std::sync::Arc;

use alloc::string::String;
use alloc::vec::Vec;

use tokio::sync::RwLock;

use crate::config::EngineConfig;
use crate::engine::ComplianceEngine;
use crate::error::ComplianceError;
use crate::storage::Storage;
use crate::types::{CropCompliance, Rule, Standard, Submission, Verification};

// ---------------------------------------------------------------------------
// AsyncComplianceEngine
// ---------------------------------------------------------------------------

/// Async compliance engine with a single Tokio `RwLock` over the full state.
///
/// Cloneable: clones share the same underlying engine.
pub struct AsyncComplianceEngine<S: Storage> {
    inner: Arc<RwLock<ComplianceEngine<S>>>,
}

impl<S: Storage> Clone for AsyncComplianceEngine<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: Storage> AsyncComplianceEngine<S> {
    /// Construct a new [`AsyncComplianceEngine`].
    ///
    /// Same initialisation semantics as
    /// [`ComplianceEngine::new`](crate::engine::ComplianceEngine::new).
    pub fn new(config: EngineConfig, storage: S, deployer: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ComplianceEngine::new(config, storage, deployer))),
        }
    }

    /// Wrap an already-constructed sync engine.
    pub fn from_engine(engine: ComplianceEngine<S>) -> Self {
        Self { inner: Arc::new(RwLock::new(engine)) }
    }

    // -----------------------------------------------------------------------
    // Access control
    // -----------------------------------------------------------------------

    /// Whether `caller` is the current admin.
    pub async fn is_admin(&self, caller: &str) -> bool {
        self.inner.read().await.is_admin(caller)
    }

    /// Identity of the current admin.
    pub async fn get_admin(&self) -> String {
        self.inner.read().await.get_admin()
    }

    /// Whether the engine is currently paused.
    pub async fn is_paused(&self) -> bool {
        self.inner.read().await.is_paused()
    }

    /// Replace the admin identity (admin-only).
    pub async fn set_admin(&self, caller: &str, new_admin: &str) -> Result<(), ComplianceError> {
        self.inner.write().await.set_admin(caller, new_admin)
    }

    /// Raise the global pause flag (admin-only).
    pub async fn pause(&self, caller: &str) -> Result<(), ComplianceError> {
        self.inner.write().await.pause(caller)
    }

    /// Clear the global pause flag (admin-only).
    pub async fn unpause(&self, caller: &str) -> Result<(), ComplianceError> {
        self.inner.write().await.unpause(caller)
    }

    // -----------------------------------------------------------------------
    // Standard catalog
    // -----------------------------------------------------------------------

    /// Register a new regulatory standard (admin-only).
    pub async fn add_standard(
        &self,
        caller: &str,
        id: u32,
        name: &str,
        description: &str,
    ) -> Result<(), ComplianceError> {
        self.inner.write().await.add_standard(caller, id, name, description)
    }

    /// Retrieve the standard with `id`.
    pub async fn get_standard(&self, id: u32) -> Option<Standard> {
        self.inner.read().await.get_standard(id)
    }

    // -----------------------------------------------------------------------
    // Rule store
    // -----------------------------------------------------------------------

    /// Register a numerical range rule (admin-only).
    pub async fn add_numerical_rule(
        &self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
        description: &str,
        min: i64,
        max: i64,
    ) -> Result<(), ComplianceError> {
        self.inner
            .write()
            .await
            .add_numerical_rule(caller, standard_id, rule_id, description, min, max)
    }

    /// Register a categorical membership rule (admin-only).
    pub async fn add_categorical_rule(
        &self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
        description: &str,
        allowed: Vec<String>,
    ) -> Result<(), ComplianceError> {
        self.inner
            .write()
            .await
            .add_categorical_rule(caller, standard_id, rule_id, description, allowed)
    }

    /// Register a temporal duration rule (admin-only).
    pub async fn add_temporal_rule(
        &self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
        description: &str,
        max_duration: u64,
    ) -> Result<(), ComplianceError> {
        self.inner
            .write()
            .await
            .add_temporal_rule(caller, standard_id, rule_id, description, max_duration)
    }

    /// Exclude a rule from future evaluation (admin-only, not pause-gated).
    pub async fn deactivate_rule(
        &self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
    ) -> Result<(), ComplianceError> {
        self.inner.write().await.deactivate_rule(caller, standard_id, rule_id)
    }

    /// Switch a deactivated rule back to active, when the configuration
    /// allows reactivation (admin-only).
    pub async fn reactivate_rule(
        &self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
    ) -> Result<(), ComplianceError> {
        self.inner.write().await.reactivate_rule(caller, standard_id, rule_id)
    }

    /// Retrieve the rule at `(standard_id, rule_id)`.
    pub async fn get_rule(&self, standard_id: u32, rule_id: u32) -> Option<Rule> {
        self.inner.read().await.get_rule(standard_id, rule_id)
    }

    // -----------------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------------

    /// Evaluate a submission and durably record the outcome.
    ///
    /// The write lock is held for the whole call, so verification ids are
    /// strictly increasing in call-completion order and no two calls are
    /// ever assigned the same id.
    pub async fn verify_compliance(
        &self,
        caller: &str,
        crop_id: &str,
        standard_id: u32,
        submission: &Submission,
        clock: u64,
    ) -> Result<Verification, ComplianceError> {
        self.inner
            .write()
            .await
            .verify_compliance(caller, crop_id, standard_id, submission, clock)
    }

    /// Retrieve the verification record at `(crop_id, verification_id)`.
    pub async fn get_verification(
        &self,
        crop_id: &str,
        verification_id: u64,
    ) -> Option<Verification> {
        self.inner.read().await.get_verification(crop_id, verification_id)
    }

    /// Retrieve the current compliance status at `(crop_id, standard_id)`.
    pub async fn get_crop_compliance(
        &self,
        crop_id: &str,
        standard_id: u32,
    ) -> Option<CropCompliance> {
        self.inner.read().await.get_crop_compliance(crop_id, standard_id)
    }

    /// The verification sequence counter.
    pub async fn get_current_version(&self) -> u64 {
        self.inner.read().await.get_current_version()
    }

    /// The rule-set version.
    pub async fn rule_set_version(&self) -> u64 {
        self.inner.read().await.rule_set_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    #[tokio::test]
    async fn concurrent_verifications_get_unique_ids() {
        let engine = AsyncComplianceEngine::new(
            EngineConfig::default(),
            InMemoryStorage::new(),
            "admin",
        );
        engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").await.unwrap();
        engine.add_numerical_rule("admin", 1, 1, "residue ppm", 0, 100).await.unwrap();

        let mut handles = Vec::new();
        for index in 0..8u64 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                let submission = Submission {
                    numeric_value: 50,
                    category: "BT".into(),
                    duration: 500,
                    data_hash: [0u8; 32],
                };
                let crop = alloc::format!("crop-{index:03}");
                engine
                    .verify_compliance("monitor", &crop, 1, &submission, index)
                    .await
                    .unwrap()
                    .verification_id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert_eq!(engine.get_current_version().await, 8);
    }

    #[tokio::test]
    async fn reads_see_a_consistent_snapshot() {
        let engine = AsyncComplianceEngine::new(
            EngineConfig::default(),
            InMemoryStorage::new(),
            "admin",
        );
        engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").await.unwrap();
        assert_eq!(engine.get_standard(1).await.unwrap().name, "EU-GMO-2024");
        assert!(engine.get_standard(2).await.is_none());
    }
}
