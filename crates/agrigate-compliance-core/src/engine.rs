// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Compliance engine — the top-level composition of all protocol components.
//!
//! [`ComplianceEngine`] owns a single [`Storage`] instance and exposes the
//! admin controls, the standard catalog, the rule store, and the
//! verification pipeline as methods on one value.  The sub-components are
//! implemented in their own modules ([`access`](crate::access),
//! [`catalog`](crate::catalog), [`rules`](crate::rules)) as additional
//! `impl` blocks on this type — they all mutate the same storage, so rule
//! validation always observes catalog writes and every engine call is one
//! atomic transition over the whole state.
//!
//! ## Evaluation order
//!
//! `verify_compliance` runs a fixed, non-configurable pipeline:
//!
//! 1. **Pause gate** — fails with `Paused` while the engine is paused.
//! 2. **Standard gate** — fails with `InvalidStandard` for an unknown id.
//! 3. **Id allocation** — the verification sequence advances by one.
//! 4. **Rule evaluation** — every active rule under the standard, in
//!    ascending rule-id order, up to the configured per-standard cap.
//! 5. **Record writes** — the immutable [`Verification`] record and the
//!    [`CropCompliance`] projection are written on **both** outcomes; only
//!    the call result distinguishes pass from fail.
//!
//! There is no caller-identity restriction on verification beyond the pause
//! gate — monitoring and oracle services submit on behalf of any crop.

use alloc::vec::Vec;

use crate::config::EngineConfig;
use crate::error::ComplianceError;
use crate::storage::Storage;
use crate::types::{AdminState, CropCompliance, Submission, Verification};

/// Composes the compliance protocol components into a single evaluation API.
///
/// The engine is generic over `S: Storage` so it can operate with any
/// persistence backend — from the built-in
/// [`InMemoryStorage`](crate::storage::InMemoryStorage) to a custom file or
/// database store.
///
/// # Construction
///
/// ```rust
/// use agrigate_compliance_core::{
///     config::EngineConfig,
///     engine::ComplianceEngine,
///     storage::InMemoryStorage,
/// };
///
/// let engine = ComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin");
/// assert_eq!(engine.get_admin(), "admin");
/// ```
///
/// # Verification
///
/// ```rust
/// use agrigate_compliance_core::{
///     config::EngineConfig,
///     engine::ComplianceEngine,
///     storage::InMemoryStorage,
///     types::Submission,
/// };
///
/// let mut engine = ComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin");
/// engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
/// engine.add_numerical_rule("admin", 1, 1, "residue ppm", 0, 100).unwrap();
///
/// let submission = Submission {
///     numeric_value: 50,
///     category: "BT".into(),
///     duration: 500,
///     data_hash: [0u8; 32],
/// };
/// let record = engine.verify_compliance("monitor", "crop-001", 1, &submission, 42).unwrap();
/// assert!(record.passed);
/// assert!(engine.get_crop_compliance("crop-001", 1).unwrap().compliant);
/// ```
pub struct ComplianceEngine<S: Storage> {
    config: EngineConfig,
    storage: S,
}

impl<S: Storage> ComplianceEngine<S> {
    /// Construct a new [`ComplianceEngine`].
    ///
    /// When `storage` carries no admin state yet, `deployer` becomes the
    /// initial admin and all counters start at zero.  When the storage was
    /// previously initialised (e.g. a reopened file backend), the stored
    /// state wins and `deployer` is ignored — an engine instance never
    /// resets counters or reassigns the admin on restart.
    pub fn new(config: EngineConfig, storage: S, deployer: &str) -> Self {
        let mut engine = Self { config, storage };
        if engine.storage.get_admin_state().is_none() {
            engine.storage.set_admin_state(AdminState {
                admin: deployer.into(),
                paused: false,
                verification_seq: 0,
                rule_set_version: 0,
            });
        }
        engine
    }

    /// Snapshot of the current admin state.
    ///
    /// `new` always initialises the state, so the default is only reachable
    /// through a storage implementation that drops the record.  Admin gates
    /// must never rely on this fallback: the default `admin` is the empty
    /// string, and comparing against it would grant caller `""` authority.
    /// They go through [`is_admin`](Self::is_admin) or read the record
    /// directly instead.
    pub(crate) fn state(&self) -> AdminState {
        self.storage.get_admin_state().unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Verification pipeline
    // -----------------------------------------------------------------------

    /// Evaluate `submission` for `crop_id` against the active rules of
    /// `standard_id`, and durably record the outcome.
    ///
    /// `clock` is the caller-injected logical clock value stored on the
    /// resulting records — the engine keeps no ambient notion of time.
    /// `caller` is accepted for call-shape parity with the admin surface
    /// but is not checked: any caller may submit a verification.  Crop
    /// existence is the registry collaborator's responsibility and is not
    /// re-checked here.
    ///
    /// On a pass the freshly written [`Verification`] record is returned.
    /// On a fail the record and the [`CropCompliance`] projection are still
    /// written before `VerificationFailed` is returned — the error reports
    /// the outcome, it does not roll anything back.
    ///
    /// # Errors
    ///
    /// * [`ComplianceError::Paused`] while the engine is paused (nothing is
    ///   written).
    /// * [`ComplianceError::InvalidStandard`] for an unknown standard id
    ///   (nothing is written).
    /// * [`ComplianceError::VerificationFailed`] when at least one active
    ///   rule failed (records **are** written).
    pub fn verify_compliance(
        &mut self,
        caller: &str,
        crop_id: &str,
        standard_id: u32,
        submission: &Submission,
        clock: u64,
    ) -> Result<Verification, ComplianceError> {
        // Deliberately unused: verification is open to any caller.
        let _ = caller;

        let mut state = self.state();
        if state.paused {
            return Err(ComplianceError::Paused);
        }
        if self.storage.get_standard(standard_id).is_none() {
            return Err(ComplianceError::InvalidStandard);
        }

        state.verification_seq += 1;
        let verification_id = state.verification_seq;

        // Ascending rule-id order, bounded by the per-standard cap.  The cap
        // is also enforced at creation time; the `take` keeps evaluation
        // bounded even against storage populated under a larger config.
        let mut failed_rule_ids: Vec<u32> = Vec::new();
        for rule_id in self
            .storage
            .rule_ids(standard_id)
            .into_iter()
            .take(self.config.max_rules_per_standard)
        {
            let rule = match self.storage.get_rule(standard_id, rule_id) {
                Some(rule) => rule,
                None => continue,
            };
            // Inactive rules and unrecognised kinds are skipped; they never
            // appear in failed_rule_ids.
            if !rule.active {
                continue;
            }
            if !rule.evaluate(submission) {
                failed_rule_ids.push(rule_id);
            }
        }

        let passed = failed_rule_ids.is_empty();
        let record = Verification {
            verification_id,
            standard_id,
            timestamp: clock,
            passed,
            failed_rule_ids,
            data_hash: submission.data_hash,
        };

        self.storage.set_verification(crop_id, record.clone());
        self.storage.set_compliance(
            crop_id,
            standard_id,
            CropCompliance {
                compliant: passed,
                last_verified: clock,
            },
        );
        self.storage.set_admin_state(state);

        if passed {
            Ok(record)
        } else {
            Err(ComplianceError::VerificationFailed {
                verification_id: record.verification_id,
                failed_rule_ids: record.failed_rule_ids,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    /// Retrieve the verification record at `(crop_id, verification_id)`.
    pub fn get_verification(&self, crop_id: &str, verification_id: u64) -> Option<Verification> {
        self.storage.get_verification(crop_id, verification_id)
    }

    /// Retrieve the current compliance status at `(crop_id, standard_id)`.
    ///
    /// Reflects only the most recent verification against that pair.
    pub fn get_crop_compliance(&self, crop_id: &str, standard_id: u32) -> Option<CropCompliance> {
        self.storage.get_compliance(crop_id, standard_id)
    }

    /// The verification sequence counter.
    ///
    /// Strictly increases with every verification call that reaches
    /// evaluation, on both pass and fail outcomes; no two verification
    /// records across one engine instance share an id.
    pub fn get_current_version(&self) -> u64 {
        self.state().verification_seq
    }

    /// The rule-set version, bumped only when rule definitions change.
    pub fn rule_set_version(&self) -> u64 {
        self.state().rule_set_version
    }

    /// Borrow the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Borrow the underlying storage (read-only).
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrow the underlying storage.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
