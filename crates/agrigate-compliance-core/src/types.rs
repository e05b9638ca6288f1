// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Shared data types used across all compliance sub-systems.
//!
//! All types implement [`Clone`], [`Debug`], [`serde::Serialize`], and
//! [`serde::Deserialize`] so they can be serialised to JSON, stored, and
//! transmitted to collaborating services without additional conversion steps.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Engine state
// ---------------------------------------------------------------------------

/// Process-wide administrative state — one instance per engine.
///
/// Created once at engine construction with the deploying identity as admin.
/// The `admin` field is mutated only by the current admin, `paused` only by
/// the current admin, and the two counters only by the engine itself:
/// `verification_seq` advances once per verification call, and
/// `rule_set_version` is bumped whenever a rule definition changes
/// (creation, deactivation, or reactivation).  The two counters are
/// deliberately independent so that verification ids never interleave with
/// rule-set versioning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminState {
    /// Identity of the current administrator.
    pub admin: String,
    /// Global pause flag gating rule creation and verification.
    pub paused: bool,
    /// Last allocated verification id (0 = none allocated yet).
    pub verification_seq: u64,
    /// Bumped once per rule-definition change.
    pub rule_set_version: u64,
}

// ---------------------------------------------------------------------------
// Standards
// ---------------------------------------------------------------------------

/// A named regulatory standard under which rules are grouped.
///
/// Standards are append-only: created once by an admin, immutable
/// thereafter, and never deleted.
///
/// # Examples
///
/// ```rust
/// use agrigate_compliance_core::types::Standard;
///
/// let standard = Standard {
///     id: 1,
///     name: "EU-GMO-2024".into(),
///     description: "EU genetically modified organism thresholds".into(),
/// };
/// assert_eq!(standard.id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standard {
    /// Unique numeric identifier.
    pub id: u32,
    /// Short display name.
    pub name: String,
    /// Free-form description of the regulatory policy.
    pub description: String,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// The kind-specific payload of a compliance rule.
///
/// Represented as a tagged sum type so that a rule can never carry payload
/// for the wrong kind.  The `Unknown` variant absorbs kinds written by a
/// future engine version during deserialisation; unknown rules are skipped
/// (treated as passing) at evaluation time.
///
/// # Examples
///
/// ```rust
/// use agrigate_compliance_core::types::RuleKind;
///
/// let kind = RuleKind::Numerical { min: 0, max: 100 };
/// assert_eq!(kind.display_name(), "Numerical");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RuleKind {
    /// Inclusive numeric range check on the submitted value.
    Numerical {
        /// Lower bound (inclusive).
        min: i64,
        /// Upper bound (inclusive).
        max: i64,
    },
    /// Membership check against a non-empty set of category labels.
    ///
    /// Insertion order is preserved for display; membership ignores order.
    Categorical {
        /// Permitted category labels.
        allowed: Vec<String>,
    },
    /// Upper bound on the submitted duration.
    Temporal {
        /// Maximum permitted duration (exclusive of nothing — `<=` passes).
        max_duration: u64,
    },
    /// A rule kind this engine version does not recognise.
    #[serde(other)]
    Unknown,
}

impl RuleKind {
    /// Human-readable kind name for logging and UI surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            RuleKind::Numerical { .. }   => "Numerical",
            RuleKind::Categorical { .. } => "Categorical",
            RuleKind::Temporal { .. }    => "Temporal",
            RuleKind::Unknown            => "Unknown",
        }
    }
}

/// One enforceable condition attached to a standard.
///
/// Keyed by `(standard_id, rule_id)` — a compound key that, once created,
/// is never reused.  Kind and payload are immutable; only `active` may
/// change, and in the base configuration only from `true` to `false`.
///
/// # Examples
///
/// ```rust
/// use agrigate_compliance_core::types::{Rule, RuleKind, Submission};
///
/// let rule = Rule {
///     standard_id: 1,
///     rule_id: 1,
///     kind: RuleKind::Numerical { min: 0, max: 100 },
///     description: "pesticide residue ppm".into(),
///     active: true,
/// };
///
/// let submission = Submission {
///     numeric_value: 50,
///     category: "BT".into(),
///     duration: 500,
///     data_hash: [0u8; 32],
/// };
/// assert!(rule.evaluate(&submission));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Standard this rule belongs to.
    pub standard_id: u32,
    /// Identifier unique within the standard.
    pub rule_id: u32,
    /// Kind tag plus kind-specific payload.
    pub kind: RuleKind,
    /// Free-form description of the condition.
    pub description: String,
    /// Whether this rule participates in evaluation.
    pub active: bool,
}

impl Rule {
    /// Evaluate this rule's condition against a submission.
    ///
    /// Returns `true` when the submission satisfies the condition.  Rules of
    /// unknown kind always pass — the engine skips them rather than failing
    /// a verification on a condition it cannot interpret.  The `active` flag
    /// is **not** consulted here; the engine filters inactive rules before
    /// evaluation.
    pub fn evaluate(&self, submission: &Submission) -> bool {
        match &self.kind {
            RuleKind::Numerical { min, max } => {
                *min <= submission.numeric_value && submission.numeric_value <= *max
            }
            RuleKind::Categorical { allowed } => {
                allowed.iter().any(|label| label == &submission.category)
            }
            RuleKind::Temporal { max_duration } => submission.duration <= *max_duration,
            RuleKind::Unknown => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Submissions and verification
// ---------------------------------------------------------------------------

/// Measurement data submitted for verification against one standard.
///
/// `data_hash` is an opaque digest supplied by the caller (typically the
/// monitoring service).  The engine stores it verbatim on the resulting
/// [`Verification`] record; it is never recomputed or validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Measured numeric value, checked by numerical rules.
    pub numeric_value: i64,
    /// Category label, checked by categorical rules.
    pub category: String,
    /// Measured duration, checked by temporal rules.
    pub duration: u64,
    /// Caller-supplied 32-byte digest of the raw measurement data.
    pub data_hash: [u8; 32],
}

/// An immutable record of one compliance verification.
///
/// Keyed by `(crop_id, verification_id)`.  Created exactly once per
/// verification call — on both pass and fail outcomes — and never mutated
/// or deleted; the set of records forms an append-only audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Engine-wide unique id allocated from the verification sequence.
    pub verification_id: u64,
    /// Standard the submission was evaluated against.
    pub standard_id: u32,
    /// Logical clock value supplied by the caller at evaluation time.
    pub timestamp: u64,
    /// Conjunction of all evaluated rule outcomes.
    pub passed: bool,
    /// Ids of active rules that failed, in ascending order.
    pub failed_rule_ids: Vec<u32>,
    /// Caller-supplied digest carried over from the submission.
    pub data_hash: [u8; 32],
}

/// Current compliance status of one crop under one standard.
///
/// Keyed by `(crop_id, standard_id)` and overwritten by every verification
/// against that pair — it reflects only the most recent outcome.  Use the
/// [`Verification`] trail for history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCompliance {
    /// Outcome of the most recent verification.
    pub compliant: bool,
    /// Logical clock value of the most recent verification.
    pub last_verified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission {
            numeric_value: 50,
            category: "BT".into(),
            duration: 500,
            data_hash: [0u8; 32],
        }
    }

    #[test]
    fn rule_kind_serialises_with_a_kind_tag() {
        let json = serde_json::to_string(&RuleKind::Numerical { min: 0, max: 100 }).unwrap();
        assert_eq!(json, r#"{"kind":"Numerical","min":0,"max":100}"#);

        let parsed: RuleKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, RuleKind::Numerical { min: 0, max: 100 });
    }

    #[test]
    fn unrecognised_kind_deserialises_to_unknown_and_passes() {
        // A record written by a future engine version with a kind this
        // version has never heard of.
        let rule: Rule = serde_json::from_str(
            r#"{
                "standard_id": 1,
                "rule_id": 4,
                "kind": { "kind": "Isotopic" },
                "description": "isotope ratio",
                "active": true
            }"#,
        )
        .unwrap();

        assert_eq!(rule.kind, RuleKind::Unknown);
        assert!(rule.evaluate(&submission()));
    }

    #[test]
    fn categorical_membership_ignores_label_order() {
        let rule = Rule {
            standard_id: 1,
            rule_id: 2,
            kind: RuleKind::Categorical { allowed: ["NK".into(), "BT".into()].into() },
            description: "seed variety".into(),
            active: true,
        };
        assert!(rule.evaluate(&submission()));
    }

    #[test]
    fn temporal_bound_is_inclusive() {
        let rule = Rule {
            standard_id: 1,
            rule_id: 3,
            kind: RuleKind::Temporal { max_duration: 500 },
            description: "storage hours".into(),
            active: true,
        };
        assert!(rule.evaluate(&submission()));

        let mut over = submission();
        over.duration = 501;
        assert!(!rule.evaluate(&over));
    }
}
