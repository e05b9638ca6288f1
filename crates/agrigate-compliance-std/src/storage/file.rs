// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! File-based JSON storage backend.
//!
//! [`FileStorage`] persists all compliance state to a single JSON file on
//! disk.  Every mutation flushes the file atomically (write-rename) so that
//! a crash mid-write does not corrupt existing data.
//!
//! ## Layout
//!
//! The JSON file has the shape:
//!
//! ```json
//! {
//!   "admin":         AdminState | null,
//!   "standards":     { "<standard_id>":                  Standard,       ... },
//!   "rules":         { "<standard_id>:<rule_id>":        Rule,           ... },
//!   "rule_index":    { "<standard_id>":                  [rule ids],     ... },
//!   "verifications": { "<crop_id>:<verification_id>":    Verification,   ... },
//!   "compliance":    { "<crop_id>:<standard_id>":        CropCompliance, ... }
//! }
//! ```
//!
//! ## Caveats
//!
//! * [`FileStorage`] holds the full in-memory state and flushes on every
//!   mutation.  It is not intended for high-frequency verification
//!   workloads.
//! * Concurrent access from multiple processes is not supported.  Use a
//!   database-backed storage implementation for multi-process deployments.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use agrigate_compliance_core::storage::Storage;
use agrigate_compliance_core::types::{
    AdminState, CropCompliance, Rule, Standard, Verification,
};
use serde::{Deserialize, Serialize};

/// Snapshot of all compliance state, serialised to / deserialised from disk.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageSnapshot {
    admin:         Option<AdminState>,
    standards:     HashMap<String, Standard>,
    rules:         HashMap<String, Rule>,
    rule_index:    HashMap<String, Vec<u32>>,
    verifications: HashMap<String, Verification>,
    compliance:    HashMap<String, CropCompliance>,
}

/// A file-backed [`Storage`] implementation that persists state as JSON.
///
/// Reopening an existing file resumes the engine exactly where it left off:
/// the admin identity, the pause flag, both counters, and every record
/// survive the restart.
///
/// # Examples
///
/// ```rust,no_run
/// use agrigate_compliance_std::storage::file::FileStorage;
/// use agrigate_compliance_core::Storage;
///
/// let storage = FileStorage::open("/tmp/compliance.json")
///     .expect("could not open storage");
/// assert!(storage.get_admin_state().is_none());
/// ```
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    data: StorageSnapshot,
}

impl FileStorage {
    /// Open an existing JSON storage file, or create a new empty one if the
    /// path does not exist.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the file exists but cannot be read or if
    /// the JSON is malformed.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw).map_err(|error| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("compliance storage JSON parse error: {}", error),
                )
            })?
        } else {
            StorageSnapshot::default()
        };

        Ok(Self { path, data })
    }

    /// Flush the current in-memory state to disk using an atomic write-rename.
    ///
    /// The file is written to `<path>.tmp` first, then renamed over the
    /// target, so a crash during the write never leaves a partial file.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if serialisation fails or the file cannot be
    /// written or renamed.
    pub fn flush(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.data).map_err(|error| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("compliance storage serialisation error: {}", error),
            )
        })?;

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Composite key used for the rule, verification, and compliance maps.
    fn composite_key(left: &str, right: &str) -> String {
        format!("{}:{}", left, right)
    }
}

impl Storage for FileStorage {
    fn get_admin_state(&self) -> Option<AdminState> {
        self.data.admin.clone()
    }

    fn set_admin_state(&mut self, state: AdminState) {
        self.data.admin = Some(state);
        // Errors are silently ignored here; callers that need guaranteed
        // durability should call flush() explicitly and handle the Result.
        let _ = self.flush();
    }

    fn get_standard(&self, standard_id: u32) -> Option<Standard> {
        self.data.standards.get(&standard_id.to_string()).cloned()
    }

    fn set_standard(&mut self, standard: Standard) {
        self.data.standards.insert(standard.id.to_string(), standard);
        let _ = self.flush();
    }

    fn get_rule(&self, standard_id: u32, rule_id: u32) -> Option<Rule> {
        let key = Self::composite_key(&standard_id.to_string(), &rule_id.to_string());
        self.data.rules.get(&key).cloned()
    }

    fn set_rule(&mut self, rule: Rule) {
        let key = Self::composite_key(&rule.standard_id.to_string(), &rule.rule_id.to_string());
        let index = self.data.rule_index.entry(rule.standard_id.to_string()).or_default();
        if let Err(position) = index.binary_search(&rule.rule_id) {
            index.insert(position, rule.rule_id);
        }
        self.data.rules.insert(key, rule);
        let _ = self.flush();
    }

    fn rule_ids(&self, standard_id: u32) -> Vec<u32> {
        self.data
            .rule_index
            .get(&standard_id.to_string())
            .cloned()
            .unwrap_or_default()
    }

    fn get_verification(&self, crop_id: &str, verification_id: u64) -> Option<Verification> {
        let key = Self::composite_key(crop_id, &verification_id.to_string());
        self.data.verifications.get(&key).cloned()
    }

    fn set_verification(&mut self, crop_id: &str, record: Verification) {
        let key = Self::composite_key(crop_id, &record.verification_id.to_string());
        self.data.verifications.insert(key, record);
        let _ = self.flush();
    }

    fn get_compliance(&self, crop_id: &str, standard_id: u32) -> Option<CropCompliance> {
        let key = Self::composite_key(crop_id, &standard_id.to_string());
        self.data.compliance.get(&key).cloned()
    }

    fn set_compliance(&mut self, crop_id: &str, standard_id: u32, status: CropCompliance) {
        let key = Self::composite_key(crop_id, &standard_id.to_string());
        self.data.compliance.insert(key, status);
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrigate_compliance_core::{config::EngineConfig, ComplianceEngine, Submission};

    /// Unique scratch path per test so parallel tests never collide.
    fn scratch_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("agrigate-{}-{}.json", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    fn submission() -> Submission {
        Submission {
            numeric_value: 50,
            category: "BT".into(),
            duration: 500,
            data_hash: [9u8; 32],
        }
    }

    #[test]
    fn state_survives_reopen() {
        let path = scratch_path("reopen");

        {
            let storage = FileStorage::open(&path).unwrap();
            let mut engine = ComplianceEngine::new(EngineConfig::default(), storage, "admin");
            engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
            engine.add_numerical_rule("admin", 1, 1, "residue ppm", 0, 100).unwrap();
            engine
                .verify_compliance("monitor", "crop-001", 1, &submission(), 42)
                .unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        // The deployer argument is ignored on reopen; the stored admin wins.
        let engine = ComplianceEngine::new(EngineConfig::default(), storage, "intruder");
        assert_eq!(engine.get_admin(), "admin");
        assert_eq!(engine.get_current_version(), 1);
        assert_eq!(engine.rule_set_version(), 1);
        assert_eq!(engine.get_standard(1).unwrap().name, "EU-GMO-2024");
        assert!(engine.get_verification("crop-001", 1).unwrap().passed);
        assert!(engine.get_crop_compliance("crop-001", 1).unwrap().compliant);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rule_index_stays_ascending_across_reopen() {
        let path = scratch_path("index");

        {
            let storage = FileStorage::open(&path).unwrap();
            let mut engine = ComplianceEngine::new(EngineConfig::default(), storage, "admin");
            engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
            engine.add_numerical_rule("admin", 1, 9, "c", 0, 1).unwrap();
            engine.add_numerical_rule("admin", 1, 3, "a", 0, 1).unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.rule_ids(1), vec![3, 9]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn open_on_missing_path_starts_empty() {
        let path = scratch_path("fresh");
        let storage = FileStorage::open(&path).unwrap();
        assert!(storage.get_admin_state().is_none());
        assert!(storage.get_standard(1).is_none());
        assert!(storage.rule_ids(1).is_empty());
    }

    #[test]
    fn malformed_json_is_reported_not_swallowed() {
        let path = scratch_path("malformed");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let _ = std::fs::remove_file(&path);
    }
}
