//! # covergrid-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings types for the counting pipeline, plus loaders for
//! settings and request files. These types are suitable for library consumers
//! and the JSON entry point alike.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Default values
//! * TOML / JSON file parsing
//!
//! ## What does NOT belong here
//! * Clap parsing (the optional `clap` feature only adds `ValueEnum`)
//! * Counting logic

#![forbid(unsafe_code)]

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use covergrid_types::CoverageRequest;

/// Default cap on cells visited by the exact enumerator.
pub const DEFAULT_ENUMERATION_LIMIT: u64 = 50_000_000;

/// Errors from loading settings or request files.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported file extension '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),
}

/// How a count is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Closed form when sound, exact enumeration otherwise.
    #[default]
    Hybrid,
    /// Always enumerate (after the O(1) short circuits).
    Enumerate,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Enumerate => "enumerate",
        }
    }
}

/// Run settings for one counting call.
///
/// Settings never change a returned count; they only pick between exact
/// strategies or refuse oversized work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountSettings {
    /// Counting strategy.
    pub strategy: Strategy,

    /// Maximum cells the enumerator may visit before the call is refused.
    pub enumeration_limit: u64,

    /// Ignore `enumeration_limit` entirely.
    pub unbounded_enumeration: bool,
}

impl Default for CountSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::Hybrid,
            enumeration_limit: DEFAULT_ENUMERATION_LIMIT,
            unbounded_enumeration: false,
        }
    }
}

impl CountSettings {
    /// The effective visit limit, or `None` when unbounded.
    pub fn limit(&self) -> Option<u64> {
        if self.unbounded_enumeration {
            None
        } else {
            Some(self.enumeration_limit)
        }
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    /// Parse settings from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load settings from a `.toml` or `.json` file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        load(path)
    }
}

/// Load a [`CoverageRequest`] from a `.toml` or `.json` file.
///
/// ```toml
/// width = 11
/// height = 11
/// threshold = 2
/// markers = [[7, 5], [6, 5]]
/// ```
pub fn read_request(path: &Path) -> Result<CoverageRequest, SettingsError> {
    load(path)
}

/// Input file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(SettingsError::UnsupportedFormat(ext)),
        }
    }

    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, SettingsError> {
        match self {
            Self::Toml => Ok(toml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    format.parse(&content)
}
