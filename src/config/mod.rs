//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::error::ConfigError;

/// What to do with a page or page size outside its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSizePolicy {
    /// Replace the value with its default (page 1, `default_page_size`)
    #[default]
    Substitute,
    /// Fail the request with a validation error
    Reject,
}

/// Whether the page and the total count must come from one read view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyPolicy {
    /// One read-only snapshot for both reads
    #[default]
    Snapshot,
    /// Two concurrent, independent reads; the count may drift from the
    /// page under concurrent writes
    Independent,
}

/// Query resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Page size used when none (or, with `substitute`, an invalid one) is given
    pub default_page_size: u32,

    /// Upper bound for `pageSize`
    pub max_page_size: u32,

    pub page_size_policy: PageSizePolicy,

    pub consistency: ConsistencyPolicy,

    /// Include specialty tags in free-text filtering
    pub search_specialties: bool,

    /// Bound on all store reads for one request
    pub store_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 50,
            page_size_policy: PageSizePolicy::default(),
            consistency: ConsistencyPolicy::default(),
            search_specialties: false,
            store_timeout_ms: 5_000,
        }
    }
}

impl ResolverConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Check that the bounds are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_page_size".to_string(),
                value: self.max_page_size.to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidValue {
                field: "default_page_size".to_string(),
                value: self.default_page_size.to_string(),
                message: format!("must be between 1 and {}", self.max_page_size),
            });
        }
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store_timeout_ms".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub resolver: ResolverConfig,
    pub server: ServerConfig,
}

impl DirectoryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate()
    }
}
