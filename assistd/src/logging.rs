//! Logging setup for the `assistd` binary
//!
//! Logs go to stderr so stdout carries only the render snapshot.
//!
//! # Log Levels
//!
//! - `warn`: navigation errors shown to the user
//! - `info`: activation, deactivation and document switches
//! - `debug`: every rescan with its counts, every applied event

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events the default filter lets through at the chosen level
const WORKSPACE_CRATES: [&str; 7] = [
    "assistd",
    "dialect_types",
    "marker_highlight",
    "state_index",
    "services_navigator",
    "services_notification",
    "services_settings",
];

/// Parses a level name such as `warn` or `DEBUG`
pub fn parse_level(name: &str) -> Result<Level, String> {
    name.parse::<Level>()
        .map_err(|_| format!("Invalid log level: {}", name))
}

/// Installs the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: Level) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(
            fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Other crates stay at `warn`
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = String::from("warn");
    for krate in WORKSPACE_CRATES {
        directives.push_str(&format!(",{}={}", krate, level));
    }
    directives
}
