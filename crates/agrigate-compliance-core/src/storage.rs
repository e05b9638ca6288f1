// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Storage abstraction for the compliance engine.
//!
//! The [`Storage`] trait is the single interface between the engine and any
//! persistence layer.  This crate ships [`InMemoryStorage`] for development
//! and testing.  Production implementations (file-based, database, etc.)
//! live in downstream crates so that this core crate remains `no_std`.
//!
//! The state it guards is exactly the engine's data model: four maps
//! (standards, rules, verifications, compliance projections) plus the
//! single [`AdminState`] record.  Rule storage additionally maintains an
//! ascending rule-id index per standard so that evaluation can iterate
//! rules in deterministic id order without scanning the whole map.
//!
//! # Implementing `Storage`
//!
//! ```rust,no_run
//! use agrigate_compliance_core::storage::Storage;
//! use agrigate_compliance_core::types::{
//!     AdminState, CropCompliance, Rule, Standard, Verification,
//! };
//!
//! struct MyStorage;
//!
//! impl Storage for MyStorage {
//!     fn get_admin_state(&self) -> Option<AdminState> { None }
//!     fn set_admin_state(&mut self, _state: AdminState) {}
//!     fn get_standard(&self, _standard_id: u32) -> Option<Standard> { None }
//!     fn set_standard(&mut self, _standard: Standard) {}
//!     fn get_rule(&self, _standard_id: u32, _rule_id: u32) -> Option<Rule> { None }
//!     fn set_rule(&mut self, _rule: Rule) {}
//!     fn rule_ids(&self, _standard_id: u32) -> Vec<u32> {
//!         Vec::new()
//!     }
//!     fn get_verification(&self, _crop_id: &str, _verification_id: u64) -> Option<Verification> {
//!         None
//!     }
//!     fn set_verification(&mut self, _crop_id: &str, _record: Verification) {}
//!     fn get_compliance(&self, _crop_id: &str, _standard_id: u32) -> Option<CropCompliance> {
//!         None
//!     }
//!     fn set_compliance(&mut self, _crop_id: &str, _standard_id: u32, _status: CropCompliance) {}
//! }
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::types::{AdminState, CropCompliance, Rule, Standard, Verification};

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// Pluggable persistence interface for the compliance engine.
///
/// The engine owns exactly one `Storage` instance and serialises every
/// operation through it, so implementations see one atomic transition per
/// engine call and never a partially-applied update.
///
/// Implementations MUST be `Send + Sync` so the engine can be shared across
/// threads when wrapped in `Arc<Mutex<...>>` or the async engine's lock.
pub trait Storage: Send + Sync {
    // ------------------------------------------------------------------
    // Admin state
    // ------------------------------------------------------------------

    /// Retrieve the admin state, if the engine has been initialised.
    ///
    /// The engine treats `None` as "no admin exists": every admin-gated
    /// operation fails with `Unauthorized` until a record is written.
    fn get_admin_state(&self) -> Option<AdminState>;

    /// Persist or overwrite the admin state.
    fn set_admin_state(&mut self, state: AdminState);

    // ------------------------------------------------------------------
    // Standards
    // ------------------------------------------------------------------

    /// Retrieve the standard with `standard_id`, if any.
    fn get_standard(&self, standard_id: u32) -> Option<Standard>;

    /// Persist a standard.  The engine never overwrites an existing id.
    fn set_standard(&mut self, standard: Standard);

    // ------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------

    /// Retrieve the rule at `(standard_id, rule_id)`, if any.
    fn get_rule(&self, standard_id: u32, rule_id: u32) -> Option<Rule>;

    /// Persist or overwrite a rule, keeping the per-standard rule-id index
    /// ascending.  Overwrites (same compound key) must not duplicate the
    /// index entry.
    fn set_rule(&mut self, rule: Rule);

    /// All rule ids registered under `standard_id`, in ascending order.
    fn rule_ids(&self, standard_id: u32) -> Vec<u32>;

    // ------------------------------------------------------------------
    // Verifications
    // ------------------------------------------------------------------

    /// Retrieve the verification record at `(crop_id, verification_id)`.
    fn get_verification(&self, crop_id: &str, verification_id: u64) -> Option<Verification>;

    /// Append an immutable verification record for `crop_id`.
    fn set_verification(&mut self, crop_id: &str, record: Verification);

    // ------------------------------------------------------------------
    // Compliance projections
    // ------------------------------------------------------------------

    /// Retrieve the current compliance status at `(crop_id, standard_id)`.
    fn get_compliance(&self, crop_id: &str, standard_id: u32) -> Option<CropCompliance>;

    /// Overwrite the compliance status at `(crop_id, standard_id)`.
    fn set_compliance(&mut self, crop_id: &str, standard_id: u32, status: CropCompliance);
}

// ---------------------------------------------------------------------------
// InMemoryStorage
// ---------------------------------------------------------------------------

/// A volatile, heap-allocated [`Storage`] implementation backed by
/// [`hashbrown::HashMap`].
///
/// All data lives in process memory and is lost when the engine is dropped.
/// Suitable for integration testing and for hosts that manage durability
/// outside the engine.
///
/// # Examples
///
/// ```rust
/// use agrigate_compliance_core::storage::{InMemoryStorage, Storage};
/// use agrigate_compliance_core::types::Standard;
///
/// let mut store = InMemoryStorage::new();
/// store.set_standard(Standard {
///     id: 1,
///     name: "EU-GMO-2024".into(),
///     description: "thresholds".into(),
/// });
/// assert!(store.get_standard(1).is_some());
/// assert!(store.get_standard(2).is_none());
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    /// Singleton admin state, absent until the engine initialises it.
    admin: Option<AdminState>,
    /// Key: decimal standard id → standard.
    standards: HashMap<String, Standard>,
    /// Key: `"{standard_id}:{rule_id}"` → rule.
    rules: HashMap<String, Rule>,
    /// Key: decimal standard id → ascending rule ids.
    rule_index: HashMap<String, Vec<u32>>,
    /// Key: `"{crop_id}:{verification_id}"` → verification record.
    verifications: HashMap<String, Verification>,
    /// Key: `"{crop_id}:{standard_id}"` → compliance status.
    compliance: HashMap<String, CropCompliance>,
}

impl InMemoryStorage {
    /// Create a new, empty [`InMemoryStorage`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite key used for the rule, verification, and compliance maps.
    fn composite_key(left: &str, right: &str) -> String {
        let mut key = String::with_capacity(left.len() + 1 + right.len());
        key.push_str(left);
        key.push(':');
        key.push_str(right);
        key
    }
}

impl Storage for InMemoryStorage {
    fn get_admin_state(&self) -> Option<AdminState> {
        self.admin.clone()
    }

    fn set_admin_state(&mut self, state: AdminState) {
        self.admin = Some(state);
    }

    fn get_standard(&self, standard_id: u32) -> Option<Standard> {
        self.standards.get(&standard_id.to_string()).cloned()
    }

    fn set_standard(&mut self, standard: Standard) {
        self.standards.insert(standard.id.to_string(), standard);
    }

    fn get_rule(&self, standard_id: u32, rule_id: u32) -> Option<Rule> {
        let key = Self::composite_key(&standard_id.to_string(), &rule_id.to_string());
        self.rules.get(&key).cloned()
    }

    fn set_rule(&mut self, rule: Rule) {
        let key = Self::composite_key(&rule.standard_id.to_string(), &rule.rule_id.to_string());
        let index = self.rule_index.entry(rule.standard_id.to_string()).or_default();
        if let Err(position) = index.binary_search(&rule.rule_id) {
            index.insert(position, rule.rule_id);
        }
        self.rules.insert(key, rule);
    }

    fn rule_ids(&self, standard_id: u32) -> Vec<u32> {
        self.rule_index
            .get(&standard_id.to_string())
            .cloned()
            .unwrap_or_default()
    }

    fn get_verification(&self, crop_id: &str, verification_id: u64) -> Option<Verification> {
        let key = Self::composite_key(crop_id, &verification_id.to_string());
        self.verifications.get(&key).cloned()
    }

    fn set_verification(&mut self, crop_id: &str, record: Verification) {
        let key = Self::composite_key(crop_id, &record.verification_id.to_string());
        self.verifications.insert(key, record);
    }

    fn get_compliance(&self, crop_id: &str, standard_id: u32) -> Option<CropCompliance> {
        let key = Self::composite_key(crop_id, &standard_id.to_string());
        self.compliance.get(&key).cloned()
    }

    fn set_compliance(&mut self, crop_id: &str, standard_id: u32, status: CropCompliance) {
        let key = Self::composite_key(crop_id, &standard_id.to_string());
        self.compliance.insert(key, status);
    }
}
