//! # Host Runtime
//!
//! Runs an event script against the simulation host and produces the final
//! render snapshot.

use crate::script::{EventScript, EventScriptError};
use crate::sim::{HostError, RenderSnapshot, SimHost};
use services_settings::persistence::{self, PersistenceError};
use services_settings::create_default_registry;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to read script {path}: {source}")]
    ScriptIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Script error: {0}")]
    Script(#[from] EventScriptError),

    #[error("Settings error: {0}")]
    Settings(#[from] PersistenceError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Host runtime configuration
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Event script to run
    pub script: PathBuf,
    /// Optional settings overrides file
    pub settings: Option<PathBuf>,
    /// Maximum events to apply (0 = unlimited)
    pub max_steps: usize,
}

/// Loads settings, runs the script and shuts the host down
pub fn run(config: &RuntimeConfig) -> Result<RenderSnapshot, RuntimeError> {
    let mut registry = create_default_registry();
    if let Some(path) = &config.settings {
        persistence::load_into(&mut registry, path)?;
    }

    let text = fs::read_to_string(&config.script).map_err(|source| RuntimeError::ScriptIo {
        path: config.script.clone(),
        source,
    })?;
    let script = EventScript::from_text(&text)?;
    let base_dir = config.script.parent().unwrap_or_else(|| Path::new(""));

    let mut host = SimHost::new(&registry);
    let steps = host.run_script(&script, base_dir, config.max_steps)?;
    info!(steps, total = script.len(), "script finished");

    Ok(host.shutdown())
}
