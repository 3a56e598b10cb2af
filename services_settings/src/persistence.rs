//! Settings persistence layer
//!
//! Workspace overrides are stored as versioned, pretty-printed JSON with
//! stable key order.

use crate::{SettingKey, SettingValue, SettingsError, SettingsRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Serializable container for settings overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    /// Version of the settings format
    pub version: u32,
    pub overrides: BTreeMap<String, SettingValue>,
}

impl SettingsOverridesData {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates a new empty settings data
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            overrides: BTreeMap::new(),
        }
    }

    /// Captures a registry's overrides
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let mut data = Self::new();
        for (key, value) in registry.export_overrides() {
            data.overrides.insert(key.as_str().to_string(), value);
        }
        data
    }

    /// Converts back into registry keys
    pub fn to_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides
            .iter()
            .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
            .collect()
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid override: {0}")]
    InvalidOverride(#[from] SettingsError),

    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes settings overrides to JSON bytes
pub fn serialize_overrides(data: &SettingsOverridesData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Deserializes settings overrides from JSON bytes
pub fn deserialize_overrides(bytes: &[u8]) -> PersistenceResult<SettingsOverridesData> {
    let data: SettingsOverridesData = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    if data.version != SettingsOverridesData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Attempts to load settings from bytes, falling back to no overrides on error
pub fn load_overrides_safe(bytes: &[u8]) -> SettingsOverridesData {
    deserialize_overrides(bytes).unwrap_or_default()
}

/// Reads an overrides file and applies it to a registry
pub fn load_into(registry: &mut SettingsRegistry, path: &Path) -> PersistenceResult<()> {
    let bytes = fs::read(path)?;
    let data = deserialize_overrides(&bytes)?;
    registry.apply_overrides(data.to_overrides())?;
    Ok(())
}

/// Writes a registry's overrides to a file
pub fn save_from(registry: &SettingsRegistry, path: &Path) -> PersistenceResult<()> {
    let bytes = serialize_overrides(&SettingsOverridesData::from_registry(registry))?;
    fs::write(path, bytes)?;
    Ok(())
}
