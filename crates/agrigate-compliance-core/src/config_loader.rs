// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Configuration loader for [`ComplianceEngine`](crate::engine::ComplianceEngine).
//!
//! Supports two load strategies:
//!
//! 1. **TOML file** — [`load_config`] reads and deserialises a TOML file into
//!    a [`ComplianceConfig`] struct.
//! 2. **Environment variables** — [`load_config_from_env`] reads `AGRIGATE_`-prefixed
//!    environment variables and constructs a [`ComplianceConfig`].
//!
//! Both loaders are only available when the `config-loader` feature is
//! enabled (it implies `std`).
//!
//! # File format
//!
//! ```toml
//! max_rules_per_standard  = 32     # integer >= 1
//! allow_rule_reactivation = false
//! ```
//!
//! # Environment variables
//!
//! | Variable                          | Type    | Default |
//! |-----------------------------------|---------|---------|
//! | `AGRIGATE_MAX_RULES_PER_STANDARD` | integer | 32      |
//! | `AGRIGATE_ALLOW_RULE_REACTIVATION`| boolean | false   |

// Only compile this module when the "config-loader" feature is enabled.
// "config-loader" implies "std", so std facilities are always available here.
#![cfg(feature = "config-loader")]

use std::fmt;
use std::fs;
use std::num::ParseIntError;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

// ---------------------------------------------------------------------------
// ComplianceConfig
// ---------------------------------------------------------------------------

/// Flat configuration struct for compliance engine construction.
///
/// This is distinct from the engine-internal [`EngineConfig`] to provide a
/// stable, serialisation-friendly representation that can be loaded from
/// TOML files or environment variables without coupling to the engine's
/// internal representation.
///
/// Use [`Into<EngineConfig>`] to convert after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Upper bound on the number of rules a single standard may hold.
    #[serde(default = "default_max_rules")]
    pub max_rules_per_standard: usize,

    /// When `true`, deactivated rules may be switched back to active.
    #[serde(default)]
    pub allow_rule_reactivation: bool,
}

fn default_max_rules() -> usize { 32 }

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            max_rules_per_standard:  default_max_rules(),
            allow_rule_reactivation: false,
        }
    }
}

impl From<ComplianceConfig> for EngineConfig {
    fn from(config: ComplianceConfig) -> Self {
        Self {
            max_rules_per_standard:  config.max_rules_per_standard,
            allow_rule_reactivation: config.allow_rule_reactivation,
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or parsing engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required file could not be opened.
    FileRead { path: String, source: std::io::Error },
    /// The TOML content could not be deserialised.
    TomlParse { source: toml::de::Error },
    /// A field could not be parsed to its expected type.
    ParseField { field: String, value: String, reason: String },
    /// A field value is outside the permitted range.
    InvalidRange { field: String, value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, source } =>
                write!(f, "Failed to read config file \"{path}\": {source}"),
            ConfigError::TomlParse { source } =>
                write!(f, "Failed to parse TOML config: {source}"),
            ConfigError::ParseField { field, value, reason } =>
                write!(f, "Field \"{field}\": cannot parse \"{value}\": {reason}"),
            ConfigError::InvalidRange { field, value, reason } =>
                write!(f, "Field \"{field}\": value \"{value}\" out of range: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::FileRead { source, .. } => Some(source),
            ConfigError::TomlParse { source }    => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TOML loader
// ---------------------------------------------------------------------------

/// Load a [`ComplianceConfig`] from a TOML file.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, if the TOML content
/// does not match the expected schema, or if `max_rules_per_standard` is
/// zero.
///
/// # Example
///
/// ```rust,no_run
/// use agrigate_compliance_core::config_loader::load_config;
///
/// let config = load_config("/etc/agrigate/compliance.toml").unwrap();
/// println!("Rule cap: {}", config.max_rules_per_standard);
/// ```
pub fn load_config(path: &str) -> Result<ComplianceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_owned(),
        source,
    })?;

    let config = toml::from_str::<ComplianceConfig>(&content)
        .map_err(|source| ConfigError::TomlParse { source })?;
    validate(config)
}

// ---------------------------------------------------------------------------
// Environment variable loader
// ---------------------------------------------------------------------------

/// Load a [`ComplianceConfig`] from `AGRIGATE_`-prefixed environment variables.
///
/// Unset variables fall back to their defaults.
///
/// # Errors
///
/// Returns a [`ConfigError::ParseField`] if any variable is set to a value
/// that cannot be parsed, or a [`ConfigError::InvalidRange`] for a zero
/// rule cap.
pub fn load_config_from_env() -> Result<ComplianceConfig, ConfigError> {
    let max_rules_per_standard =
        read_env_usize("AGRIGATE_MAX_RULES_PER_STANDARD", default_max_rules())?;
    let allow_rule_reactivation = read_env_bool("AGRIGATE_ALLOW_RULE_REACTIVATION", false)?;

    validate(ComplianceConfig {
        max_rules_per_standard,
        allow_rule_reactivation,
    })
}

fn validate(config: ComplianceConfig) -> Result<ComplianceConfig, ConfigError> {
    if config.max_rules_per_standard == 0 {
        return Err(ConfigError::InvalidRange {
            field: "max_rules_per_standard".into(),
            value: "0".into(),
            reason: "a standard must be able to hold at least one rule".into(),
        });
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn read_env_usize(key: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<usize>().map_err(|source: ParseIntError| {
            ConfigError::ParseField {
                field: key.to_owned(),
                value: val,
                reason: source.to_string(),
            }
        }),
        Err(_) => Ok(default),
    }
}

fn read_env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
            "true"  | "1" | "yes" | "on"  => Ok(true),
            "false" | "0" | "no"  | "off" => Ok(false),
            other => Err(ConfigError::ParseField {
                field: key.to_owned(),
                value: other.to_owned(),
                reason: "expected one of: true/false, 1/0, yes/no, on/off".into(),
            }),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_with_defaults() {
        let config: ComplianceConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_rules_per_standard, 32);
        assert!(!config.allow_rule_reactivation);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: ComplianceConfig =
            toml::from_str("max_rules_per_standard = 8\nallow_rule_reactivation = true\n").unwrap();
        assert_eq!(config.max_rules_per_standard, 8);
        assert!(config.allow_rule_reactivation);
    }

    #[test]
    fn zero_rule_cap_is_rejected() {
        let err = validate(ComplianceConfig {
            max_rules_per_standard: 0,
            allow_rule_reactivation: false,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));
    }

    #[test]
    fn converts_into_engine_config() {
        let engine_config: EngineConfig = ComplianceConfig {
            max_rules_per_standard: 4,
            allow_rule_reactivation: true,
        }
        .into();
        assert_eq!(engine_config.max_rules_per_standard, 4);
        assert!(engine_config.allow_rule_reactivation);
    }
}
