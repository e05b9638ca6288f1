// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Rule store — typed rule constructors, deactivation, and lookup.
//!
//! One constructor per rule kind, all sharing the same validation shape:
//!
//! 1. `Paused` while the engine is paused.
//! 2. `Unauthorized` unless the caller is the admin.
//! 3. `InvalidRule` if the referenced standard does not exist.
//! 4. `InvalidRule` if a rule already exists at `(standard_id, rule_id)`.
//! 5. `InvalidRule` on the kind-specific payload check.
//! 6. `InvalidRule` once the standard holds the configured maximum number
//!    of rules.
//!
//! A rule's kind and payload are immutable after creation.  Only the
//! `active` flag changes: [`deactivate_rule`](crate::engine::ComplianceEngine::deactivate_rule)
//! flips it to `false`, and — only when
//! [`EngineConfig::allow_rule_reactivation`](crate::config::EngineConfig::allow_rule_reactivation)
//! is set — [`reactivate_rule`](crate::engine::ComplianceEngine::reactivate_rule)
//! flips it back.  Deactivation is deliberately **not** gated by the pause
//! flag so the safety action stays available during an incident.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ComplianceError;
use crate::storage::Storage;
use crate::types::{Rule, RuleKind};

impl<S: Storage> crate::engine::ComplianceEngine<S> {
    /// Register a numerical range rule with inclusive bounds.
    ///
    /// A submission passes when `min <= numeric_value <= max`.
    ///
    /// # Errors
    ///
    /// The shared validation shape (see the module docs), with the
    /// kind-specific check `min > max` → [`ComplianceError::InvalidRule`].
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
    /// engine.add_numerical_rule("admin", 1, 1, "residue ppm", 0, 100).unwrap();
    /// assert_eq!(
    ///     engine.add_numerical_rule("admin", 1, 2, "inverted", 10, 5),
    ///     Err(ComplianceError::InvalidRule)
    /// );
    /// ```
    pub fn add_numerical_rule(
        &mut self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
        description: &str,
        min: i64,
        max: i64,
    ) -> Result<(), ComplianceError> {
        self.gate_rule_creation(caller, standard_id, rule_id)?;
        if min > max {
            return Err(ComplianceError::InvalidRule);
        }
        self.insert_rule(standard_id, rule_id, description, RuleKind::Numerical { min, max })
    }

    /// Register a categorical membership rule.
    ///
    /// A submission passes when its category label is a member of `allowed`.
    /// Insertion order of the labels is preserved for display; membership
    /// ignores order.
    ///
    /// # Errors
    ///
    /// The shared validation shape, with the kind-specific check
    /// "empty category set" → [`ComplianceError::InvalidRule`].
    pub fn add_categorical_rule(
        &mut self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
        description: &str,
        allowed: Vec<String>,
    ) -> Result<(), ComplianceError> {
        self.gate_rule_creation(caller, standard_id, rule_id)?;
        if allowed.is_empty() {
            return Err(ComplianceError::InvalidRule);
        }
        self.insert_rule(standard_id, rule_id, description, RuleKind::Categorical { allowed })
    }

    /// Register a temporal rule bounding the submitted duration.
    ///
    /// A submission passes when `duration <= max_duration`.
    ///
    /// # Errors
    ///
    /// The shared validation shape, with the kind-specific check
    /// `max_duration == 0` → [`ComplianceError::InvalidRule`].
    pub fn add_temporal_rule(
        &mut self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
        description: &str,
        max_duration: u64,
    ) -> Result<(), ComplianceError> {
        self.gate_rule_creation(caller, standard_id, rule_id)?;
        if max_duration == 0 {
            return Err(ComplianceError::InvalidRule);
        }
        self.insert_rule(standard_id, rule_id, description, RuleKind::Temporal { max_duration })
    }

    /// Exclude a rule from future evaluation without deleting its history.
    ///
    /// Not gated by the pause flag.
    ///
    /// # Errors
    ///
    /// * [`ComplianceError::Unauthorized`] unless `caller` is the current admin.
    /// * [`ComplianceError::NoRuleFound`] if no rule exists at the key.
    pub fn deactivate_rule(
        &mut self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
    ) -> Result<(), ComplianceError> {
        if !self.is_admin(caller) {
            return Err(ComplianceError::Unauthorized);
        }
        let mut rule = self
            .storage()
            .get_rule(standard_id, rule_id)
            .ok_or(ComplianceError::NoRuleFound)?;
        rule.active = false;
        self.storage_mut().set_rule(rule);
        self.bump_rule_set_version();
        Ok(())
    }

    /// Switch a deactivated rule back to active.
    ///
    /// Only available when
    /// [`EngineConfig::allow_rule_reactivation`](crate::config::EngineConfig::allow_rule_reactivation)
    /// is set; the base configuration keeps the active flag monotonic.
    ///
    /// # Errors
    ///
    /// * [`ComplianceError::Unauthorized`] unless `caller` is the current admin.
    /// * [`ComplianceError::InvalidRule`] when reactivation is disabled.
    /// * [`ComplianceError::NoRuleFound`] if no rule exists at the key.
    pub fn reactivate_rule(
        &mut self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
    ) -> Result<(), ComplianceError> {
        if !self.is_admin(caller) {
            return Err(ComplianceError::Unauthorized);
        }
        if !self.config().allow_rule_reactivation {
            return Err(ComplianceError::InvalidRule);
        }
        let mut rule = self
            .storage()
            .get_rule(standard_id, rule_id)
            .ok_or(ComplianceError::NoRuleFound)?;
        rule.active = true;
        self.storage_mut().set_rule(rule);
        self.bump_rule_set_version();
        Ok(())
    }

    /// Retrieve the rule at `(standard_id, rule_id)`, or `None` when absent.
    pub fn get_rule(&self, standard_id: u32, rule_id: u32) -> Option<Rule> {
        self.storage().get_rule(standard_id, rule_id)
    }

    // -----------------------------------------------------------------------
    // Shared validation
    // -----------------------------------------------------------------------

    /// Gates 1–4 of the shared constructor validation shape.
    fn gate_rule_creation(
        &self,
        caller: &str,
        standard_id: u32,
        rule_id: u32,
    ) -> Result<(), ComplianceError> {
        let state = self.state();
        if state.paused {
            return Err(ComplianceError::Paused);
        }
        if !self.is_admin(caller) {
            return Err(ComplianceError::Unauthorized);
        }
        if self.storage().get_standard(standard_id).is_none() {
            return Err(ComplianceError::InvalidRule);
        }
        if self.storage().get_rule(standard_id, rule_id).is_some() {
            return Err(ComplianceError::InvalidRule);
        }
        Ok(())
    }

    /// Capacity check plus the actual insert and rule-set version bump.
    fn insert_rule(
        &mut self,
        standard_id: u32,
        rule_id: u32,
        description: &str,
        kind: RuleKind,
    ) -> Result<(), ComplianceError> {
        if self.storage().rule_ids(standard_id).len() >= self.config().max_rules_per_standard {
            return Err(ComplianceError::InvalidRule);
        }
        self.storage_mut().set_rule(Rule {
            standard_id,
            rule_id,
            kind,
            description: description.into(),
            active: true,
        });
        self.bump_rule_set_version();
        Ok(())
    }

    fn bump_rule_set_version(&mut self) {
        let mut state = self.state();
        state.rule_set_version += 1;
        self.storage_mut().set_admin_state(state);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::engine::ComplianceEngine;
    use crate::error::ComplianceError;
    use crate::storage::InMemoryStorage;
    use crate::types::RuleKind;

    fn engine() -> ComplianceEngine<InMemoryStorage> {
        let mut engine =
            ComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin");
        engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
        engine
    }

    #[test]
    fn constructors_require_an_existing_standard() {
        let mut engine = engine();
        assert_eq!(
            engine.add_numerical_rule("admin", 9, 1, "x", 0, 1),
            Err(ComplianceError::InvalidRule)
        );
        assert_eq!(
            engine.add_categorical_rule("admin", 9, 1, "x", ["BT".into()].into()),
            Err(ComplianceError::InvalidRule)
        );
        assert_eq!(
            engine.add_temporal_rule("admin", 9, 1, "x", 10),
            Err(ComplianceError::InvalidRule)
        );
    }

    #[test]
    fn compound_key_is_never_reused() {
        let mut engine = engine();
        engine.add_numerical_rule("admin", 1, 1, "residue ppm", 0, 100).unwrap();

        // Same key, any kind: rejected without touching the stored rule.
        assert_eq!(
            engine.add_numerical_rule("admin", 1, 1, "other", 5, 6),
            Err(ComplianceError::InvalidRule)
        );
        assert_eq!(
            engine.add_temporal_rule("admin", 1, 1, "other", 10),
            Err(ComplianceError::InvalidRule)
        );

        let stored = engine.get_rule(1, 1).unwrap();
        assert_eq!(stored.description, "residue ppm");
        assert_eq!(stored.kind, RuleKind::Numerical { min: 0, max: 100 });
    }

    #[test]
    fn kind_specific_payloads_are_validated() {
        let mut engine = engine();
        assert_eq!(
            engine.add_numerical_rule("admin", 1, 1, "inverted", 10, 5),
            Err(ComplianceError::InvalidRule)
        );
        assert_eq!(
            engine.add_categorical_rule("admin", 1, 1, "empty", Vec::new()),
            Err(ComplianceError::InvalidRule)
        );
        assert_eq!(
            engine.add_temporal_rule("admin", 1, 1, "zero", 0),
            Err(ComplianceError::InvalidRule)
        );
        // Nothing was stored and the rule-set version did not move.
        assert!(engine.get_rule(1, 1).is_none());
        assert_eq!(engine.rule_set_version(), 0);
    }

    #[test]
    fn equal_bounds_are_a_valid_numerical_rule() {
        let mut engine = engine();
        engine.add_numerical_rule("admin", 1, 1, "exact", 7, 7).unwrap();
        assert_eq!(engine.get_rule(1, 1).unwrap().kind, RuleKind::Numerical { min: 7, max: 7 });
    }

    #[test]
    fn new_rules_start_active() {
        let mut engine = engine();
        engine.add_temporal_rule("admin", 1, 3, "storage hours", 1000).unwrap();
        assert!(engine.get_rule(1, 3).unwrap().active);
    }

    #[test]
    fn deactivation_only_touches_the_active_flag() {
        let mut engine = engine();
        engine
            .add_categorical_rule("admin", 1, 2, "seed variety", ["BT".into(), "NK".into()].into())
            .unwrap();

        engine.deactivate_rule("admin", 1, 2).unwrap();

        let rule = engine.get_rule(1, 2).unwrap();
        assert!(!rule.active);
        assert_eq!(rule.description, "seed variety");
        assert_eq!(
            rule.kind,
            RuleKind::Categorical { allowed: ["BT".into(), "NK".into()].into() }
        );
    }

    #[test]
    fn deactivating_an_absent_rule_fails() {
        let mut engine = engine();
        assert_eq!(engine.deactivate_rule("admin", 1, 9), Err(ComplianceError::NoRuleFound));
        assert_eq!(
            engine.deactivate_rule("mallory", 1, 9),
            Err(ComplianceError::Unauthorized)
        );
    }

    #[test]
    fn reactivation_is_disabled_by_default() {
        let mut engine = engine();
        engine.add_temporal_rule("admin", 1, 3, "storage hours", 1000).unwrap();
        engine.deactivate_rule("admin", 1, 3).unwrap();

        assert_eq!(engine.reactivate_rule("admin", 1, 3), Err(ComplianceError::InvalidRule));
        assert!(!engine.get_rule(1, 3).unwrap().active);
    }

    #[test]
    fn reactivation_works_when_enabled() {
        let config = EngineConfig { allow_rule_reactivation: true, ..EngineConfig::default() };
        let mut engine = ComplianceEngine::new(config, InMemoryStorage::new(), "admin");
        engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
        engine.add_temporal_rule("admin", 1, 3, "storage hours", 1000).unwrap();

        engine.deactivate_rule("admin", 1, 3).unwrap();
        engine.reactivate_rule("admin", 1, 3).unwrap();
        assert!(engine.get_rule(1, 3).unwrap().active);

        assert_eq!(engine.reactivate_rule("admin", 1, 9), Err(ComplianceError::NoRuleFound));
    }

    #[test]
    fn rule_ids_stay_ascending_regardless_of_insertion_order() {
        let mut engine = engine();
        engine.add_numerical_rule("admin", 1, 7, "c", 0, 1).unwrap();
        engine.add_numerical_rule("admin", 1, 2, "a", 0, 1).unwrap();
        engine.add_numerical_rule("admin", 1, 5, "b", 0, 1).unwrap();

        use crate::storage::Storage;
        assert_eq!(engine.storage().rule_ids(1), alloc::vec![2, 5, 7]);
    }
}
