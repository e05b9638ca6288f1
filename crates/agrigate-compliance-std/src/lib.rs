// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! # agrigate-compliance-std
//!
//! `std`-only storage backends for `agrigate-compliance-core`.
//!
//! This crate provides [`FileStorage`], a JSON file-backed implementation of
//! the [`Storage`](agrigate_compliance_core::Storage) trait suitable for CLI
//! tools, local regulators' tooling, and server-side deployments that do not
//! need a full database.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agrigate_compliance_std::storage::FileStorage;
//! use agrigate_compliance_core::{ComplianceEngine, config::EngineConfig};
//!
//! let storage = FileStorage::open("/var/lib/agrigate/compliance.json")
//!     .expect("failed to open storage file");
//!
//! let mut engine = ComplianceEngine::new(EngineConfig::default(), storage, "admin");
//! ```

pub mod storage;

pub use storage::file::FileStorage;
