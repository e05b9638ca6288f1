// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Error taxonomy shared with collaborating services.
//!
//! Every mutating engine call returns `Result<_, ComplianceError>`.  Errors
//! are returned synchronously to the immediate caller; nothing is retried
//! and nothing is logged inside the engine (logging is a collaborator
//! concern).  Each variant carries a stable numeric [`code`](ComplianceError::code)
//! for callers that consume the platform-wide taxonomy.
//!
//! The variants from [`InvalidData`](ComplianceError::InvalidData) onward are
//! reserved: no engine path produces them today, but they stay distinct so
//! that stricter validation can be added later without renumbering.

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Failure modes of the compliance engine.
///
/// # Examples
///
/// ```rust
/// use agrigate_compliance_core::error::ComplianceError;
///
/// assert_eq!(ComplianceError::Unauthorized.code(), 1);
/// assert_eq!(ComplianceError::Paused.code(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceError {
    /// A non-admin caller attempted an admin-only action.
    Unauthorized,
    /// Malformed or conflicting rule definition at creation time.
    InvalidRule,
    /// Deactivation or reactivation target does not exist.
    NoRuleFound,
    /// A standard with the given id already exists.
    AlreadyExists,
    /// Verification requested against an unknown standard.
    InvalidStandard,
    /// A gated call was made while the engine is paused.
    Paused,
    /// Evaluation completed but at least one active rule failed.
    ///
    /// The [`Verification`](crate::types::Verification) record and the
    /// [`CropCompliance`](crate::types::CropCompliance) projection are
    /// written **before** this error is returned — the failure signals the
    /// outcome to the caller, not a rolled-back transition.
    VerificationFailed {
        /// Id of the verification record that was written.
        verification_id: u64,
        /// Ids of the rules that failed, in ascending order.
        failed_rule_ids: Vec<u32>,
    },
    /// Reserved for future submission-payload validation.
    InvalidData,
    /// Reserved for future threshold validation.
    InvalidThreshold,
    /// Reserved for future category-label validation.
    InvalidCategory,
    /// Reserved for future version-compatibility checks.
    InvalidVersion,
    /// Reserved for future crop-registration checks.
    NoCropRegistered,
    /// Reserved for future logical-clock validation.
    InvalidTimestamp,
}

impl ComplianceError {
    /// Stable numeric code for this error, shared across the platform.
    pub fn code(&self) -> u32 {
        match self {
            ComplianceError::Unauthorized            => 1,
            ComplianceError::InvalidRule             => 2,
            ComplianceError::NoRuleFound             => 3,
            ComplianceError::AlreadyExists           => 4,
            ComplianceError::InvalidStandard         => 5,
            ComplianceError::Paused                  => 6,
            ComplianceError::VerificationFailed { .. } => 7,
            ComplianceError::InvalidData             => 8,
            ComplianceError::InvalidThreshold        => 9,
            ComplianceError::InvalidCategory         => 10,
            ComplianceError::InvalidVersion          => 11,
            ComplianceError::NoCropRegistered        => 12,
            ComplianceError::InvalidTimestamp        => 13,
        }
    }
}

impl fmt::Display for ComplianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceError::Unauthorized =>
                write!(f, "caller is not the current admin"),
            ComplianceError::InvalidRule =>
                write!(f, "malformed or conflicting rule definition"),
            ComplianceError::NoRuleFound =>
                write!(f, "no rule exists at the given (standard, rule) key"),
            ComplianceError::AlreadyExists =>
                write!(f, "a standard with this id already exists"),
            ComplianceError::InvalidStandard =>
                write!(f, "verification requested against an unknown standard"),
            ComplianceError::Paused =>
                write!(f, "engine is paused"),
            ComplianceError::VerificationFailed { verification_id, failed_rule_ids } =>
                write!(
                    f,
                    "verification {} failed {} rule(s)",
                    verification_id,
                    failed_rule_ids.len()
                ),
            ComplianceError::InvalidData =>
                write!(f, "invalid submission data"),
            ComplianceError::InvalidThreshold =>
                write!(f, "invalid threshold"),
            ComplianceError::InvalidCategory =>
                write!(f, "invalid category label"),
            ComplianceError::InvalidVersion =>
                write!(f, "invalid version"),
            ComplianceError::NoCropRegistered =>
                write!(f, "crop is not registered"),
            ComplianceError::InvalidTimestamp =>
                write!(f, "invalid timestamp"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ComplianceError {}
