//! Configuration types for molsift runs.
//!
//! A [`SiftConfig`] can be built in code with the `with_*` setters or loaded
//! from a JSON file. Missing fields fall back to their defaults.

use crate::error::{checked_capacity, Result, SiftError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest `top_count` or `sample_size` accepted by [`SiftConfig::validate`].
pub const MAX_CAPACITY: usize = 1 << 26;

/// Main configuration for a selection or sampling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Number of best-scoring candidates to keep.
    pub top_count: usize,

    /// Number of lines to keep in the reservoir sample.
    pub sample_size: usize,

    /// Seed for the sampler. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Log progress every this many sources (0 disables progress logs).
    pub progress_interval: u64,

    /// Allow overwriting existing output files.
    pub overwrite: bool,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            top_count: 10,
            sample_size: 100,
            seed: None,
            progress_interval: 10_000,
            overwrite: false,
        }
    }
}

impl SiftConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of candidates to keep.
    pub fn with_top_count(mut self, k: usize) -> Self {
        self.top_count = k;
        self
    }

    /// Set the reservoir sample size.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    /// Set a fixed sampler seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the progress logging interval.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Allow or forbid overwriting output files.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Apply signed counts given on the command line, then validate.
    ///
    /// `None` keeps the current value. Negative or oversized counts fail
    /// with `InvalidCapacity`.
    pub fn with_count_overrides(
        mut self,
        top_count: Option<i64>,
        sample_size: Option<i64>,
    ) -> Result<Self> {
        if let Some(k) = top_count {
            self.top_count = checked_capacity(k)?;
        }
        if let Some(n) = sample_size {
            self.sample_size = checked_capacity(n)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SiftError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that capacities stay within [`MAX_CAPACITY`].
    pub fn validate(&self) -> Result<()> {
        if self.top_count > MAX_CAPACITY {
            return Err(SiftError::invalid_capacity(format!(
                "top_count {} exceeds {MAX_CAPACITY}",
                self.top_count
            )));
        }
        if self.sample_size > MAX_CAPACITY {
            return Err(SiftError::invalid_capacity(format!(
                "sample_size {} exceeds {MAX_CAPACITY}",
                self.sample_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_default_config() {
        let config = SiftConfig::default();
        assert_eq!(config.top_count, 10);
        assert_eq!(config.sample_size, 100);
        assert!(config.seed.is_none());
        assert!(!config.overwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SiftConfig::new()
            .with_top_count(5)
            .with_sample_size(3)
            .with_seed(42)
            .with_overwrite(true);

        assert_eq!(config.top_count, 5);
        assert_eq!(config.sample_size, 3);
        assert_eq!(config.seed, Some(42));
        assert!(config.overwrite);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SiftConfig::from_json_str(r#"{ "top_count": 2, "seed": 7 }"#).unwrap();
        assert_eq!(config.top_count, 2);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.sample_size, 100);
        assert_eq!(config.progress_interval, 10_000);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SiftConfig::new().with_top_count(3).with_seed(1);
        let json = config.to_json().unwrap();
        assert_eq!(SiftConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = SiftConfig::from_json_str(r#"{ "sample_size": -3 }"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let config = SiftConfig::new().with_top_count(MAX_CAPACITY + 1);
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCapacity);
    }

    #[test]
    fn test_count_overrides() {
        let config = SiftConfig::new()
            .with_count_overrides(Some(3), None)
            .unwrap();
        assert_eq!(config.top_count, 3);
        assert_eq!(config.sample_size, 100);

        let config = SiftConfig::new()
            .with_count_overrides(None, Some(0))
            .unwrap();
        assert_eq!(config.sample_size, 0);
    }

    #[test]
    fn test_count_overrides_are_validated() {
        let oversized = MAX_CAPACITY as i64 + 1;
        let err = SiftConfig::new()
            .with_count_overrides(Some(oversized), None)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCapacity);

        let err = SiftConfig::new()
            .with_count_overrides(None, Some(i64::MAX))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCapacity);

        let err = SiftConfig::new()
            .with_count_overrides(None, Some(-1))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCapacity);
    }
}
