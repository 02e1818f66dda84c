#![forbid(unsafe_code)]

//! Engine configuration as data.
//!
//! [`EngineConfig`] groups every tunable limit of the trace engine so it can be
//! loaded from TOML or JSON at startup instead of being a compile-time constant.
//!
//! # Loading
//!
//! ```toml
//! # dryrun.toml
//! max_len = 32
//!
//! [distribution]
//! max_value = 99
//! bucket_count = 4
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::load("dryrun.toml")?;
//! let config = EngineConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field has a default, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest radix the digit passes support.
pub const MAX_RADIX: u32 = 36;

/// Largest configurable `distribution.max_value`.
pub const MAX_DISTRIBUTION_VALUE: u64 = 1_000_000;

/// Limits and parameters for trace construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Longest accepted input array.
    pub max_len: usize,
    /// Most steps one algorithm run may emit (the terminal step is extra).
    pub max_steps: usize,
    /// Parameters for counting, radix and bucket sort.
    pub distribution: DistributionConfig,
}

/// Parameters shared by the distribution sorts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributionConfig {
    /// Largest value a distribution sort accepts; larger values are a range error.
    pub max_value: u64,
    /// Number of equal-width buckets over `0..=max_value` for bucket sort.
    pub bucket_count: usize,
    /// Digit base for radix sort.
    pub radix_base: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_len: 64,
            max_steps: 200_000,
            distribution: DistributionConfig::default(),
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            max_value: 999,
            bucket_count: 5,
            radix_base: 10,
        }
    }
}

impl EngineConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a file, choosing the format by extension (`.json`, else TOML), and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::parse_toml(&content)?
        };
        config.validated()
    }

    #[cfg(feature = "config-files")]
    fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        Self::from_toml_str(content)
    }

    #[cfg(not(feature = "config-files"))]
    fn parse_toml(_content: &str) -> Result<Self, ConfigError> {
        Err(ConfigError::Unsupported("TOML config requires the `config-files` feature"))
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_steps == 0 {
            errors.push("max_steps must be > 0".into());
        }

        let dist = &self.distribution;
        if dist.bucket_count == 0 {
            errors.push("distribution.bucket_count must be > 0".into());
        }
        if dist.radix_base < 2 || dist.radix_base > MAX_RADIX {
            errors.push(format!(
                "distribution.radix_base must be in 2..={MAX_RADIX}, got {}",
                dist.radix_base
            ));
        }
        // Counting sort tallies every value in 0..=max.
        if dist.max_value > MAX_DISTRIBUTION_VALUE {
            errors.push(format!(
                "distribution.max_value must be <= {MAX_DISTRIBUTION_VALUE}, got {}",
                dist.max_value
            ));
        }

        errors
    }

    /// Return `self` if it validates, else a [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(String),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{0}")]
    Unsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = EngineConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn validate_catches_zero_buckets() {
        let mut config = EngineConfig::default();
        config.distribution.bucket_count = 0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("bucket_count")));
    }

    #[test]
    fn validate_catches_bad_radix() {
        let mut config = EngineConfig::default();
        config.distribution.radix_base = 1;
        assert!(config.validate().iter().any(|e| e.contains("radix_base")));
        config.distribution.radix_base = 37;
        assert!(config.validate().iter().any(|e| e.contains("radix_base")));
    }

    #[test]
    fn validate_catches_huge_value_range() {
        let mut config = EngineConfig::default();
        config.distribution.max_value = MAX_DISTRIBUTION_VALUE + 1;
        assert!(config.validate().iter().any(|e| e.contains("max_value")));
    }

    #[test]
    fn validate_catches_zero_step_budget() {
        let config = EngineConfig {
            max_steps: 0,
            ..EngineConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(err.to_string().contains("max_steps"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{"max_len": 8, "distribution": {"radix_base": 2}}"#)
                .unwrap();
        assert_eq!(config.max_len, 8);
        assert_eq!(config.distribution.radix_base, 2);
        assert_eq!(config.distribution.bucket_count, 5);
        assert_eq!(config.max_steps, EngineConfig::default().max_steps);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = EngineConfig::from_json_str(r#"{"max_length": 8}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_json_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"distribution": {"bucket_count": 0}}"#).unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/dryrun.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[cfg(feature = "config-files")]
    #[test]
    fn load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dryrun.toml");
        std::fs::write(
            &path,
            "max_len = 16\n\n[distribution]\nmax_value = 99\nbucket_count = 4\n",
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.max_len, 16);
        assert_eq!(config.distribution.max_value, 99);
        assert_eq!(config.distribution.bucket_count, 4);
        assert_eq!(config.distribution.radix_base, 10);
    }
}
