//! Reader configuration
//!
//! Defaults can be overridden from environment variables or a YAML file:
//!
//! | Field | Env var |
//! |-------|---------|
//! | `source` | `INITIALIZR_METADATA_SOURCE` (`bundled`, `file`, `remote`) |
//! | `location` | `INITIALIZR_METADATA_LOCATION` |
//! | `size_limit` | `INITIALIZR_METADATA_SIZE_LIMIT` |
//! | `timeout_secs` | `INITIALIZR_HTTP_TIMEOUT_SECS` |
//! | `validate_schema` | `INITIALIZR_METADATA_VALIDATE` |

use crate::metadata::source::{MetadataSource, DEFAULT_METADATA_URL};
use crate::metadata::stream::PROTECTED_LENGTH;
use crate::metadata::MetadataError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Kind of metadata source to read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Bundled,
    File,
    Remote,
}

impl FromStr for SourceKind {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bundled" => Ok(SourceKind::Bundled),
            "file" => Ok(SourceKind::File),
            "remote" => Ok(SourceKind::Remote),
            other => Err(MetadataError::configuration(format!(
                "Unknown metadata source '{}'",
                other
            ))
            .with_hint("Use one of: bundled, file, remote.")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub source: SourceKind,
    /// File path or URL, depending on `source`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub size_limit: u64,
    pub timeout_secs: u64,
    pub validate_schema: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Bundled,
            location: None,
            size_limit: PROTECTED_LENGTH,
            timeout_secs: 30,
            validate_schema: false,
        }
    }
}

impl ReaderConfig {
    pub fn from_env() -> Result<Self, MetadataError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (keyed by env var name) on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MetadataError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(source) = lookup("INITIALIZR_METADATA_SOURCE") {
            config.source = source.parse()?;
        }
        if let Some(location) = lookup("INITIALIZR_METADATA_LOCATION") {
            config.location = Some(location);
        }
        if let Some(limit) = lookup("INITIALIZR_METADATA_SIZE_LIMIT") {
            config.size_limit = parse_var("INITIALIZR_METADATA_SIZE_LIMIT", &limit)?;
        }
        if let Some(timeout) = lookup("INITIALIZR_HTTP_TIMEOUT_SECS") {
            config.timeout_secs = parse_var("INITIALIZR_HTTP_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(validate) = lookup("INITIALIZR_METADATA_VALIDATE") {
            config.validate_schema = parse_var("INITIALIZR_METADATA_VALIDATE", &validate)?;
        }
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, MetadataError> {
        serde_yaml::from_str(content).map_err(|e| {
            MetadataError::configuration(format!("Invalid reader configuration: {}", e))
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MetadataError::configuration(format!(
                "Failed to read configuration {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Build the source this configuration points at
    pub fn to_source(&self) -> Result<MetadataSource, MetadataError> {
        match self.source {
            SourceKind::Bundled => Ok(MetadataSource::Bundled),
            SourceKind::File => {
                let location = self.location.as_deref().ok_or_else(|| {
                    MetadataError::configuration("File source requires a location")
                        .with_hint("Set INITIALIZR_METADATA_LOCATION to the metadata file path.")
                })?;
                Ok(MetadataSource::file(location))
            }
            SourceKind::Remote => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(Duration::from_secs(self.timeout_secs))
                    .user_agent(concat!("initializr-metadata/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .map_err(|e| {
                        MetadataError::Internal(format!("Failed to create HTTP client: {}", e))
                    })?;
                let url = self.location.as_deref().unwrap_or(DEFAULT_METADATA_URL);
                MetadataSource::remote(client, url)
            }
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, MetadataError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        MetadataError::configuration(format!("Invalid value '{}' for {}: {}", value, key, e))
    })
}
