//! # Dialect Assist
//!
//! Editor assistance for the conversational state-machine dialect: marker
//! highlighting, transition lenses, and jump/back navigation between state
//! declarations, wired to a host through one owned [`Session`].
//!
//! ## Philosophy
//!
//! - **One owner**: All runtime state lives in the [`Session`]; nothing is global
//! - **Host-agnostic**: The session talks to editors through [`ActiveEditor`], never a concrete UI
//! - **Deterministic**: [`SimHost`] replays event scripts to identical render snapshots
//!
//! ## Example
//!
//! ```
//! use assistd::SimHost;
//! use dialect_types::{DocumentId, LanguageId};
//! use services_settings::create_default_registry;
//!
//! let mut host = SimHost::new(&create_default_registry());
//! let flow = DocumentId::new("flow.yaml");
//! host.open_document(
//!     flow.clone(),
//!     LanguageId::yaml(),
//!     "states:\n  a:\n    transitions:\n      next: b\n  b:\n",
//! );
//!
//! host.click_lens(0).unwrap();
//! assert_eq!(host.session().history(), ["b"]);
//! assert_eq!(host.viewport(), Some((4, 4)));
//! ```

pub mod commands;
pub mod config;
pub mod logging;
pub mod runtime;
pub mod script;
pub mod session;
pub mod sim;

pub use commands::{AssistCommand, CommandDescriptor, CommandError, JUMP_COMMAND, POP_COMMAND};
pub use config::AssistConfig;
pub use runtime::{run, RuntimeConfig, RuntimeError};
pub use script::{EventScript, EventScriptError, ScriptedEvent};
pub use session::{ActiveEditor, CodeLens, Session, SessionError};
pub use sim::{AppliedDecoration, HostError, RenderSnapshot, SimDocument, SimHost};
