//! Typed view of the settings the session reads at activation

use dialect_types::LanguageId;
use marker_highlight::{DecorationStyle, MarkerClass};
use services_settings::{keys, SettingsRegistry};

/// Effective add-on configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistConfig {
    /// Language whose documents get transition lenses
    pub dialect_language: LanguageId,
    pub highlight_enabled: bool,
    pub todo_style: DecorationStyle,
    pub fixme_style: DecorationStyle,
    pub lens_enabled: bool,
    pub status_priority: i64,
}

impl AssistConfig {
    /// Reads the configuration, falling back to built-in values for missing keys
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let defaults = Self::default();
        let string_or = |key: &str, fallback: &str| {
            registry.get_string(key).unwrap_or(fallback).to_string()
        };

        Self {
            dialect_language: registry
                .get_string(keys::DIALECT_LANGUAGE)
                .map(LanguageId::new)
                .unwrap_or(defaults.dialect_language),
            highlight_enabled: registry
                .get_bool(keys::HIGHLIGHT_ENABLED)
                .unwrap_or(defaults.highlight_enabled),
            todo_style: DecorationStyle::new(
                string_or(keys::HIGHLIGHT_TODO_BACKGROUND, &defaults.todo_style.background),
                string_or(keys::HIGHLIGHT_TODO_BORDER, &defaults.todo_style.border),
                string_or(keys::HIGHLIGHT_TODO_RULER, &defaults.todo_style.ruler_color),
            ),
            fixme_style: DecorationStyle::new(
                string_or(keys::HIGHLIGHT_FIXME_BACKGROUND, &defaults.fixme_style.background),
                string_or(keys::HIGHLIGHT_FIXME_BORDER, &defaults.fixme_style.border),
                string_or(keys::HIGHLIGHT_FIXME_RULER, &defaults.fixme_style.ruler_color),
            ),
            lens_enabled: registry
                .get_bool(keys::LENS_ENABLED)
                .unwrap_or(defaults.lens_enabled),
            status_priority: registry
                .get_integer(keys::STATUS_PRIORITY)
                .unwrap_or(defaults.status_priority),
        }
    }

    /// Decoration style of a marker class
    pub fn style(&self, class: MarkerClass) -> &DecorationStyle {
        match class {
            MarkerClass::Todo => &self.todo_style,
            MarkerClass::Fixme => &self.fixme_style,
        }
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            dialect_language: LanguageId::yaml(),
            highlight_enabled: true,
            todo_style: DecorationStyle::default_for(MarkerClass::Todo),
            fixme_style: DecorationStyle::default_for(MarkerClass::Fixme),
            lens_enabled: true,
            status_priority: 1,
        }
    }
}
