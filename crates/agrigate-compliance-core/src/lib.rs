// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! # agrigate-compliance-core
//!
//! Core compliance rule engine for the Agrigate platform: versioned
//! regulatory standards, typed rules, and deterministic pass/fail
//! verification with an append-only audit trail.
//!
//! This crate is `no_std`-compatible (requires `alloc`).  Enable the `std`
//! feature (on by default) to lift that restriction and gain access to
//! standard-library conveniences.
//!
//! ## Architecture
//!
//! ```text
//! ComplianceEngine<S: Storage>
//!   ├── access   — admin check, admin handover, global pause flag
//!   ├── catalog  — append-only registry of regulatory standards
//!   ├── rules    — typed rule constructors, deactivation, lookup
//!   └── engine   — verification pipeline + read accessors
//! ```
//!
//! The engine owns a single [`Storage`] instance; every call is one atomic
//! transition over the whole state (four maps plus the admin scalars).
//! Caller identity and the logical clock are injected as parameters, so the
//! engine is deterministic and testable without a host environment.
//!
//! ## Quick Start
//!
//! ```rust
//! use agrigate_compliance_core::{
//!     config::EngineConfig,
//!     engine::ComplianceEngine,
//!     storage::InMemoryStorage,
//!     types::Submission,
//! };
//!
//! let mut engine = ComplianceEngine::new(EngineConfig::default(), InMemoryStorage::new(), "admin");
//!
//! // Policy configuration (admin-only).
//! engine.add_standard("admin", 1, "EU-GMO-2024", "GMO thresholds").unwrap();
//! engine.add_numerical_rule("admin", 1, 1, "residue ppm", 0, 100).unwrap();
//! engine.add_categorical_rule("admin", 1, 2, "seed variety", vec!["BT".into()]).unwrap();
//! engine.add_temporal_rule("admin", 1, 3, "storage hours", 1000).unwrap();
//!
//! // Verification (any caller).
//! let submission = Submission {
//!     numeric_value: 50,
//!     category: "BT".into(),
//!     duration: 500,
//!     data_hash: [0u8; 32],
//! };
//! let record = engine.verify_compliance("monitor", "crop-001", 1, &submission, 42).unwrap();
//! assert!(record.passed);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod access;
pub mod async_engine;
pub mod catalog;
pub mod config;
pub mod config_loader;
pub mod engine;
pub mod error;
pub mod rules;
pub mod storage;
pub mod types;

// Re-export the most commonly used items at the crate root so consumers can
// write `use agrigate_compliance_core::ComplianceEngine;` instead of the
// fully qualified path.
pub use config::EngineConfig;
pub use engine::ComplianceEngine;
pub use error::ComplianceError;
pub use storage::{InMemoryStorage, Storage};
pub use types::{
    AdminState, CropCompliance, Rule, RuleKind, Standard, Submission, Verification,
};
