//! # Simulation Host
//!
//! A deterministic in-memory editor that drives a [`Session`] the way a real
//! editor host would.
//!
//! ## Philosophy
//!
//! - **Host semantics, no UI**: Open documents, one active editor, selection, viewport and decorations
//! - **Same event order**: Activating fires active-editor-changed, then requests lenses; edits fire document-changed, then request lenses
//! - **Observable**: [`SimHost::render`] captures everything a user would see
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A text editor (edits are whole-line inserts, replacements and deletions)
//! - A split-view host (at most one editor is visible)

use crate::commands::CommandError;
use crate::script::{EventScript, ScriptedEvent};
use crate::session::{ActiveEditor, CodeLens, Session, SessionError};
use dialect_types::{CommandId, DocumentId, LanguageId, TextRange, TextSnapshot};
use marker_highlight::{DecorationStyle, HighlightMatch, MarkerClass};
use serde::{Deserialize, Serialize};
use services_navigator::{EditorSurface, NavigationOutcome};
use services_notification::StatusItem;
use services_settings::SettingsRegistry;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Simulation host errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Unknown document: {0}")]
    UnknownDocument(DocumentId),

    #[error("No active editor")]
    NoActiveEditor,

    #[error("Line {line} is out of range for {document} ({lines} lines)")]
    LineOutOfRange {
        document: DocumentId,
        line: usize,
        lines: usize,
    },

    #[error("No lens {index} in {document} ({available} available)")]
    NoSuchLens {
        document: DocumentId,
        index: usize,
        available: usize,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// An open document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimDocument {
    pub language: LanguageId,
    lines: Vec<String>,
}

impl SimDocument {
    /// Creates a document, splitting on `\n` only
    pub fn new(language: LanguageId, text: &str) -> Self {
        Self {
            language,
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn snapshot(&self) -> TextSnapshot {
        TextSnapshot::from_lines(&self.lines)
    }
}

/// One decorated range as the host paints it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDecoration {
    pub class: MarkerClass,
    pub range: TextRange,
    pub hover: String,
    pub style: DecorationStyle,
}

/// Per-document editor view state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ViewState {
    selected_line: usize,
    top_line: usize,
    decorations: BTreeMap<MarkerClass, Vec<AppliedDecoration>>,
}

/// The active editor: a document plus its view
struct SimEditor<'a> {
    id: &'a DocumentId,
    document: &'a SimDocument,
    view: &'a mut ViewState,
}

impl EditorSurface for SimEditor<'_> {
    fn selected_line_text(&self) -> String {
        self.document
            .lines
            .get(self.view.selected_line)
            .cloned()
            .unwrap_or_default()
    }

    fn reveal_line_at_top(&mut self, line: usize) {
        self.view.selected_line = line;
        self.view.top_line = line;
    }
}

impl ActiveEditor for SimEditor<'_> {
    fn document_id(&self) -> DocumentId {
        self.id.clone()
    }

    fn language(&self) -> LanguageId {
        self.document.language.clone()
    }

    fn snapshot(&self) -> TextSnapshot {
        self.document.snapshot()
    }

    fn set_decorations(
        &mut self,
        class: MarkerClass,
        style: &DecorationStyle,
        matches: &[HighlightMatch],
    ) {
        let applied = matches
            .iter()
            .map(|m| AppliedDecoration {
                class,
                range: m.range,
                hover: m.annotation.clone(),
                style: style.clone(),
            })
            .collect();
        self.view.decorations.insert(class, applied);
    }
}

/// Builds the active editor from disjoint host fields
fn active_editor<'a>(
    active: &'a Option<DocumentId>,
    documents: &'a BTreeMap<DocumentId, SimDocument>,
    views: &'a mut BTreeMap<DocumentId, ViewState>,
) -> Option<SimEditor<'a>> {
    let id = active.as_ref()?;
    let document = documents.get(id)?;
    let view = views.entry(id.clone()).or_default();
    Some(SimEditor { id, document, view })
}

fn as_dyn<'b>(editor: &'b mut Option<SimEditor<'_>>) -> Option<&'b mut dyn ActiveEditor> {
    editor.as_mut().map(|e| e as &mut dyn ActiveEditor)
}

/// Everything visible in the simulated editor at one moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub active_document: Option<DocumentId>,
    pub selected_line: Option<usize>,
    pub top_line: Option<usize>,
    pub status: StatusItem,
    pub history: Vec<String>,
    pub decorations: Vec<AppliedDecoration>,
    pub lenses: Vec<CodeLens>,
    /// Messages shown to the user, oldest first
    pub notifications: Vec<String>,
}

/// In-memory editor host
pub struct SimHost {
    session: Session,
    documents: BTreeMap<DocumentId, SimDocument>,
    views: BTreeMap<DocumentId, ViewState>,
    active: Option<DocumentId>,
    lenses: BTreeMap<DocumentId, Vec<CodeLens>>,
}

impl SimHost {
    /// Creates a host with no documents and activates a session on it
    pub fn new(settings: &SettingsRegistry) -> Self {
        Self {
            session: Session::activate(settings, None),
            documents: BTreeMap::new(),
            views: BTreeMap::new(),
            active: None,
            lenses: BTreeMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn document(&self, id: &DocumentId) -> Option<&SimDocument> {
        self.documents.get(id)
    }

    pub fn active_document(&self) -> Option<&DocumentId> {
        self.active.as_ref()
    }

    /// Lenses last provided for a document
    pub fn lenses(&self, id: &DocumentId) -> &[CodeLens] {
        self.lenses.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Decorations currently painted in a document's editor
    pub fn decorations(&self, id: &DocumentId) -> Vec<&AppliedDecoration> {
        self.views
            .get(id)
            .map(|view| view.decorations.values().flatten().collect())
            .unwrap_or_default()
    }

    /// Selected line and first visible line of the active editor
    pub fn viewport(&self) -> Option<(usize, usize)> {
        let view = self.views.get(self.active.as_ref()?)?;
        Some((view.selected_line, view.top_line))
    }

    /// Opens (or reopens with new text) a document and makes it active
    pub fn open_document(&mut self, id: DocumentId, language: LanguageId, text: &str) {
        debug!(document = %id, language = %language, "opened document");
        self.documents.insert(id.clone(), SimDocument::new(language, text));
        self.views.insert(id.clone(), ViewState::default());
        self.lenses.remove(&id);
        self.activate_document(&id);
    }

    /// Reads a file and opens it, taking the language from the extension unless given
    pub fn open_file(&mut self, path: &Path, language: Option<LanguageId>) -> Result<DocumentId, HostError> {
        let text = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let id = DocumentId::new(path.to_string_lossy());
        let language = language.unwrap_or_else(|| LanguageId::from_path(id.as_str()));
        self.open_document(id.clone(), language, &text);
        Ok(id)
    }

    /// Makes an open document the active one
    pub fn activate(&mut self, id: &DocumentId) -> Result<(), HostError> {
        if !self.documents.contains_key(id) {
            return Err(HostError::UnknownDocument(id.clone()));
        }
        self.activate_document(id);
        Ok(())
    }

    fn activate_document(&mut self, id: &DocumentId) {
        self.active = Some(id.clone());
        let mut editor = active_editor(&self.active, &self.documents, &mut self.views);
        self.session.on_active_editor_changed(as_dyn(&mut editor));
        self.request_lenses(id);
    }

    /// Leaves the host without an active editor
    pub fn close_active(&mut self) {
        self.active = None;
        self.session.on_active_editor_changed(None);
    }

    /// Moves the selection of the active editor
    pub fn select_line(&mut self, line: usize) -> Result<(), HostError> {
        let id = self.active_id()?;
        self.check_line(&id, line, 0)?;
        let view = self.views.entry(id).or_default();
        view.selected_line = line;
        Ok(())
    }

    /// Inserts a line before `line`; `line` may equal the line count
    pub fn insert_line(&mut self, line: usize, text: &str) -> Result<(), HostError> {
        let id = self.active_id()?;
        self.check_line(&id, line, 1)?;
        self.edit(&id, |lines| lines.insert(line, text.to_string()));
        Ok(())
    }

    pub fn replace_line(&mut self, line: usize, text: &str) -> Result<(), HostError> {
        let id = self.active_id()?;
        self.check_line(&id, line, 0)?;
        self.edit(&id, |lines| lines[line] = text.to_string());
        Ok(())
    }

    /// Deletes a line; deleting the only line leaves one empty line
    pub fn delete_line(&mut self, line: usize) -> Result<(), HostError> {
        let id = self.active_id()?;
        self.check_line(&id, line, 0)?;
        self.edit(&id, |lines| {
            lines.remove(line);
            if lines.is_empty() {
                lines.push(String::new());
            }
        });
        Ok(())
    }

    /// Runs a command against the active editor, if any
    pub fn execute(
        &mut self,
        id: &CommandId,
        arguments: &[String],
    ) -> Result<NavigationOutcome, SessionError> {
        let mut editor = active_editor(&self.active, &self.documents, &mut self.views);
        self.session.execute_command(id, arguments, as_dyn(&mut editor))
    }

    /// Clicks the n-th lens of the active document
    pub fn click_lens(&mut self, index: usize) -> Result<NavigationOutcome, HostError> {
        let document = self.active_id()?;
        let lenses = self.lenses(&document);
        let invocation = lenses
            .get(index)
            .map(|lens| lens.command.clone())
            .ok_or_else(|| HostError::NoSuchLens {
                document: document.clone(),
                index,
                available: lenses.len(),
            })?;
        self.run_reported(&invocation.command, &invocation.arguments)
    }

    /// Clicks the status indicator; does nothing while it has no action
    pub fn click_status(&mut self) -> Result<NavigationOutcome, HostError> {
        match self.session.status().command.clone() {
            Some(command) => self.run_reported(&command, &[]),
            None => Ok(NavigationOutcome::Unchanged),
        }
    }

    /// Applies one scripted event
    ///
    /// Navigation failures are already shown to the user and do not stop a
    /// script. File paths resolve against `base_dir`.
    pub fn apply(&mut self, event: &ScriptedEvent, base_dir: &Path) -> Result<(), HostError> {
        debug!(event = ?event, "applying event");
        match event {
            ScriptedEvent::Open { path, language } => {
                self.open_file(&base_dir.join(path), language.as_deref().map(LanguageId::new))?;
            }
            ScriptedEvent::Activate { path } => {
                self.activate(&DocumentId::new(base_dir.join(path).to_string_lossy()))?;
            }
            ScriptedEvent::Close => self.close_active(),
            ScriptedEvent::Select { line } => self.select_line(*line)?,
            ScriptedEvent::Insert { line, text } => self.insert_line(*line, text)?,
            ScriptedEvent::Replace { line, text } => self.replace_line(*line, text)?,
            ScriptedEvent::Delete { line } => self.delete_line(*line)?,
            ScriptedEvent::Jump { target } => {
                let arguments: Vec<String> = target.iter().cloned().collect();
                self.run_reported(&crate::commands::jump_command_id(), &arguments)?;
            }
            ScriptedEvent::Back => {
                self.run_reported(&crate::commands::pop_command_id(), &[])?;
            }
            ScriptedEvent::Lens { index } => {
                self.click_lens(*index)?;
            }
            ScriptedEvent::Status => {
                self.click_status()?;
            }
        }
        Ok(())
    }

    /// Runs a script; `max_steps` of 0 means no limit
    ///
    /// Returns the number of events applied.
    pub fn run_script(
        &mut self,
        script: &EventScript,
        base_dir: &Path,
        max_steps: usize,
    ) -> Result<usize, HostError> {
        let mut steps = 0;
        for event in script.events() {
            if max_steps > 0 && steps >= max_steps {
                info!(steps, "step limit reached");
                break;
            }
            self.apply(event, base_dir)?;
            steps += 1;
        }
        Ok(steps)
    }

    /// Captures what the user currently sees
    pub fn render(&self) -> RenderSnapshot {
        let view = self.active.as_ref().and_then(|id| self.views.get(id));
        let messages: Vec<String> = self
            .session
            .notifications()
            .history()
            .map(|n| n.to_string())
            .collect();

        RenderSnapshot {
            active_document: self.active.clone(),
            selected_line: view.map(|v| v.selected_line),
            top_line: view.map(|v| v.top_line),
            status: self.session.status().clone(),
            history: self.session.history().to_vec(),
            decorations: self
                .active
                .as_ref()
                .map(|id| self.decorations(id).into_iter().cloned().collect())
                .unwrap_or_default(),
            lenses: self
                .active
                .as_ref()
                .map(|id| self.lenses(id).to_vec())
                .unwrap_or_default(),
            notifications: messages,
        }
    }

    /// Deactivates the session and returns the final render
    pub fn shutdown(self) -> RenderSnapshot {
        let snapshot = self.render();
        let notifications = self.session.deactivate();
        debug!(
            notifications = notifications.notification_count(),
            "host shut down"
        );
        snapshot
    }

    fn run_reported(
        &mut self,
        command: &CommandId,
        arguments: &[String],
    ) -> Result<NavigationOutcome, HostError> {
        match self.execute(command, arguments) {
            Ok(outcome) => Ok(outcome),
            Err(SessionError::Navigation(_)) => Ok(NavigationOutcome::Unchanged),
            Err(SessionError::Command(err)) => Err(err.into()),
        }
    }

    fn active_id(&self) -> Result<DocumentId, HostError> {
        self.active.clone().ok_or(HostError::NoActiveEditor)
    }

    /// Checks `line < line_count + slack`
    fn check_line(&self, id: &DocumentId, line: usize, slack: usize) -> Result<(), HostError> {
        let lines = self
            .documents
            .get(id)
            .map(SimDocument::line_count)
            .ok_or_else(|| HostError::UnknownDocument(id.clone()))?;
        if line >= lines + slack {
            return Err(HostError::LineOutOfRange {
                document: id.clone(),
                line,
                lines,
            });
        }
        Ok(())
    }

    fn edit(&mut self, id: &DocumentId, change: impl FnOnce(&mut Vec<String>)) {
        let Some(document) = self.documents.get_mut(id) else {
            return;
        };
        change(&mut document.lines);
        let last_line = document.lines.len() - 1;

        if let Some(view) = self.views.get_mut(id) {
            view.selected_line = view.selected_line.min(last_line);
            view.top_line = view.top_line.min(last_line);
        }

        let mut editor = active_editor(&self.active, &self.documents, &mut self.views);
        self.session.on_document_changed(id, as_dyn(&mut editor));
        self.request_lenses(id);
    }

    /// Asks the session for lenses of a visible document
    fn request_lenses(&mut self, id: &DocumentId) {
        if self.active.as_ref() != Some(id) {
            return;
        }
        let Some(document) = self.documents.get(id) else {
            return;
        };
        let lenses = self
            .session
            .provide_lenses(id, &document.language, &document.snapshot());
        self.lenses.insert(id.clone(), lenses);
    }
}
