// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Engine-level configuration.
//!
//! [`EngineConfig`] is the single entry point for tuning the compliance
//! engine at construction time.  All fields have sensible defaults so that
//! `EngineConfig::default()` is always a valid starting point.

use serde::{Deserialize, Serialize};

/// Top-level configuration for [`ComplianceEngine`](crate::engine::ComplianceEngine).
///
/// # Examples
///
/// ```rust
/// use agrigate_compliance_core::config::EngineConfig;
///
/// let config = EngineConfig {
///     max_rules_per_standard: 8,
///     ..EngineConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on the number of rules a single standard may hold.
    /// Rule creation fails with `InvalidRule` once the cap is reached, and
    /// evaluation never visits more than this many rules.
    /// Defaults to `32`.
    pub max_rules_per_standard: usize,

    /// When `true`, a deactivated rule may be switched back to active via
    /// [`reactivate_rule`](crate::engine::ComplianceEngine::reactivate_rule).
    /// Defaults to `false` (the active flag moves monotonically from
    /// `true` to `false`).
    pub allow_rule_reactivation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rules_per_standard: 32,
            allow_rule_reactivation: false,
        }
    }
}
