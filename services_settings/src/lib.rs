//! # Settings Registry Service
//!
//! Typed configuration for the add-on.
//!
//! ## Philosophy
//!
//! - **Typed settings**: All settings have explicit types, not stringly-typed
//! - **Layered**: Read-only defaults plus one layer of workspace overrides
//! - **Validated**: An override must name a known key and keep its type
//! - **Deterministic**: Settings are serializable with stable key order
//!
//! ## Example
//!
//! ```ignore
//! use services_settings::{create_default_registry, keys, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::LENS_ENABLED, SettingValue::Boolean(false))?;
//!
//! assert_eq!(registry.get_bool(keys::LENS_ENABLED), Some(false));
//! ```

pub mod persistence;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Setting key (dotted path)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl SettingValue {
    /// Name of the value's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer(_) => "integer",
            SettingValue::String(_) => "string",
        }
    }

    /// Returns true if both values hold the same type
    pub fn same_type(&self, other: &SettingValue) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// Settings errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(SettingKey),

    #[error("Setting {key} expects a {expected} value, got {found}")]
    TypeMismatch {
        key: SettingKey,
        expected: &'static str,
        found: &'static str,
    },
}

/// Settings registry
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    /// Default settings (read-only once registered)
    defaults: BTreeMap<SettingKey, SettingValue>,
    /// Workspace overrides
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets a workspace override
    ///
    /// The key must have a registered default of the same type.
    pub fn set_override(
        &mut self,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) -> Result<(), SettingsError> {
        let key = key.into();
        self.validate(&key, &value)?;
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Gets the effective value (override or default)
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        let key = SettingKey::new(key);
        self.overrides.get(&key).or_else(|| self.defaults.get(&key))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_boolean)
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(SettingValue::as_integer)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_string)
    }

    /// Exports all overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Applies overrides on top of the current ones
    ///
    /// Every entry is validated before any is applied.
    pub fn apply_overrides(
        &mut self,
        overrides: BTreeMap<SettingKey, SettingValue>,
    ) -> Result<(), SettingsError> {
        for (key, value) in &overrides {
            self.validate(key, value)?;
        }
        self.overrides.extend(overrides);
        Ok(())
    }

    fn validate(&self, key: &SettingKey, value: &SettingValue) -> Result<(), SettingsError> {
        let default = self
            .defaults
            .get(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
        if !default.same_type(value) {
            return Err(SettingsError::TypeMismatch {
                key: key.clone(),
                expected: default.type_name(),
                found: value.type_name(),
            });
        }
        Ok(())
    }
}

/// Setting keys of the add-on
pub mod keys {
    pub const DIALECT_LANGUAGE: &str = "assist.dialect_language";
    pub const HIGHLIGHT_ENABLED: &str = "highlight.enabled";
    pub const HIGHLIGHT_TODO_BACKGROUND: &str = "highlight.todo.background";
    pub const HIGHLIGHT_TODO_BORDER: &str = "highlight.todo.border";
    pub const HIGHLIGHT_TODO_RULER: &str = "highlight.todo.ruler";
    pub const HIGHLIGHT_FIXME_BACKGROUND: &str = "highlight.fixme.background";
    pub const HIGHLIGHT_FIXME_BORDER: &str = "highlight.fixme.border";
    pub const HIGHLIGHT_FIXME_RULER: &str = "highlight.fixme.ruler";
    pub const LENS_ENABLED: &str = "lens.enabled";
    pub const STATUS_PRIORITY: &str = "status.priority";
}

/// Creates a settings registry with the add-on's defaults
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();
    let string = |s: &str| SettingValue::String(s.to_string());

    registry.register_default(keys::DIALECT_LANGUAGE, string("yaml"));

    // Marker highlighting
    registry.register_default(keys::HIGHLIGHT_ENABLED, SettingValue::Boolean(true));
    registry.register_default(keys::HIGHLIGHT_TODO_BACKGROUND, string("rgba(255,255,0,0.2)"));
    registry.register_default(keys::HIGHLIGHT_TODO_BORDER, string("1px solid gold"));
    registry.register_default(keys::HIGHLIGHT_TODO_RULER, string("yellow"));
    registry.register_default(keys::HIGHLIGHT_FIXME_BACKGROUND, string("rgba(255,0,0,0.2)"));
    registry.register_default(keys::HIGHLIGHT_FIXME_BORDER, string("1px solid red"));
    registry.register_default(keys::HIGHLIGHT_FIXME_RULER, string("red"));

    // Transition lenses and history indicator
    registry.register_default(keys::LENS_ENABLED, SettingValue::Boolean(true));
    registry.register_default(keys::STATUS_PRIORITY, SettingValue::Integer(1));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_key_creation() {
        let key = SettingKey::new("lens.enabled");
        assert_eq!(key.as_str(), "lens.enabled");
        assert_eq!(key.to_string(), "lens.enabled");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(SettingValue::Boolean(true).as_boolean(), Some(true));
        assert_eq!(SettingValue::Integer(3).as_integer(), Some(3));
        assert_eq!(SettingValue::String("x".into()).as_string(), Some("x"));
        assert_eq!(SettingValue::Integer(3).as_string(), None);
        assert_eq!(SettingValue::Integer(3).type_name(), "integer");
        assert!(SettingValue::Boolean(false).same_type(&SettingValue::Boolean(true)));
    }

    #[test]
    fn test_default_registry() {
        let registry = create_default_registry();
        assert_eq!(registry.get_string(keys::DIALECT_LANGUAGE), Some("yaml"));
        assert_eq!(registry.get_bool(keys::HIGHLIGHT_ENABLED), Some(true));
        assert_eq!(registry.get_bool(keys::LENS_ENABLED), Some(true));
        assert_eq!(registry.get_integer(keys::STATUS_PRIORITY), Some(1));
        assert_eq!(registry.get_string(keys::HIGHLIGHT_FIXME_BORDER), Some("1px solid red"));
        assert!(registry.export_overrides().is_empty());
    }

    #[test]
    fn test_override_takes_precedence() {
        let mut registry = create_default_registry();
        registry
            .set_override(keys::LENS_ENABLED, SettingValue::Boolean(false))
            .unwrap();
        assert_eq!(registry.get_bool(keys::LENS_ENABLED), Some(false));
        assert_eq!(registry.get_bool(keys::HIGHLIGHT_ENABLED), Some(true));
    }

    #[test]
    fn test_override_unknown_key_rejected() {
        let mut registry = create_default_registry();
        let err = registry
            .set_override("editor.tab_size", SettingValue::Integer(2))
            .unwrap_err();
        assert_eq!(err, SettingsError::UnknownKey(SettingKey::new("editor.tab_size")));
    }

    #[test]
    fn test_override_type_mismatch_rejected() {
        let mut registry = create_default_registry();
        let err = registry
            .set_override(keys::STATUS_PRIORITY, SettingValue::String("high".into()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Setting status.priority expects a integer value, got string"
        );
        assert_eq!(registry.get_integer(keys::STATUS_PRIORITY), Some(1));
    }

    #[test]
    fn test_apply_overrides_is_all_or_nothing() {
        let mut registry = create_default_registry();
        let mut overrides = BTreeMap::new();
        overrides.insert(SettingKey::new(keys::LENS_ENABLED), SettingValue::Boolean(false));
        overrides.insert(SettingKey::new("unknown.key"), SettingValue::Boolean(false));

        assert!(registry.apply_overrides(overrides).is_err());
        assert!(registry.export_overrides().is_empty());
    }

    #[test]
    fn test_export_overrides() {
        let mut registry = create_default_registry();
        registry
            .set_override(keys::HIGHLIGHT_ENABLED, SettingValue::Boolean(false))
            .unwrap();

        let exported = registry.export_overrides();
        assert_eq!(exported.len(), 1);
        assert_eq!(
            exported.get(&SettingKey::new(keys::HIGHLIGHT_ENABLED)),
            Some(&SettingValue::Boolean(false))
        );
    }
}
