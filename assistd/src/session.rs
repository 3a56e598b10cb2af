//! The add-on session: everything that lives from activation to deactivation

use crate::commands::{jump_command_id, pop_command_id, AssistCommand, CommandError};
use crate::config::AssistConfig;
use dialect_types::{CommandId, CommandInvocation, DocumentId, LanguageId, TextRange, TextSnapshot};
use marker_highlight::{scan_markers, DecorationStyle, HighlightMatch, HighlightSet, MarkerClass};
use serde::{Deserialize, Serialize};
use services_navigator::{EditorSurface, NavigationError, NavigationOutcome, Navigator};
use services_notification::{NotificationService, StatusAlignment, StatusItem};
use services_settings::SettingsRegistry;
use state_index::{DialectScan, StateIndex};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Session errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Already shown to the user as an error notification
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// The host's active text editor, as seen by the session
pub trait ActiveEditor: EditorSurface {
    fn document_id(&self) -> DocumentId;

    fn language(&self) -> LanguageId;

    /// Current full text of the document
    fn snapshot(&self) -> TextSnapshot;

    /// Replaces every decoration of one marker class
    fn set_decorations(
        &mut self,
        class: MarkerClass,
        style: &DecorationStyle,
        matches: &[HighlightMatch],
    );
}

/// A lens as handed to the host: where it sits and what clicking it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLens {
    pub range: TextRange,
    pub command: CommandInvocation,
}

/// State index tagged with the document it was built from
#[derive(Debug, Clone, Default)]
struct IndexCache {
    document: Option<DocumentId>,
    index: StateIndex,
}

impl IndexCache {
    fn replace(&mut self, document: DocumentId, index: StateIndex) {
        self.document = Some(document);
        self.index = index;
    }

    /// Forgets the cached index if it was built from `document`
    fn invalidate(&mut self, document: &DocumentId) {
        if self.document.as_ref() == Some(document) {
            debug!(document = %document, "state index invalidated by edit");
            self.document = None;
            self.index = StateIndex::new();
        }
    }

    /// Index of `document`, rebuilding from the editor if the cache is for another one
    fn ensure(&mut self, document: &DocumentId, editor: &dyn ActiveEditor) -> &StateIndex {
        if self.document.as_ref() != Some(document) {
            let index = StateIndex::build(&editor.snapshot());
            debug!(document = %document, states = index.len(), "rebuilt state index for jump");
            self.replace(document.clone(), index);
        }
        &self.index
    }
}

/// Lets the navigator drive an [`ActiveEditor`] trait object
struct SurfaceAdapter<'a>(&'a mut dyn ActiveEditor);

impl EditorSurface for SurfaceAdapter<'_> {
    fn selected_line_text(&self) -> String {
        self.0.selected_line_text()
    }

    fn reveal_line_at_top(&mut self, line: usize) {
        self.0.reveal_line_at_top(line)
    }
}

/// Owned add-on state
///
/// Created by [`Session::activate`] and consumed by [`Session::deactivate`].
/// Hosts forward editor events to it and run its commands.
pub struct Session {
    config: AssistConfig,
    notifications: NotificationService,
    navigator: Navigator,
    index_cache: IndexCache,
    /// Document of the editor the history belongs to
    current_document: Option<DocumentId>,
    /// Last highlight scan and the document it was applied to
    highlights: Option<(DocumentId, HighlightSet)>,
}

impl Session {
    /// Starts a session, highlighting the active editor if there is one
    pub fn activate(settings: &SettingsRegistry, active: Option<&mut dyn ActiveEditor>) -> Self {
        let config = AssistConfig::from_registry(settings);
        let status = StatusItem::new(StatusAlignment::Left, config.status_priority);

        let mut session = Self {
            config,
            notifications: NotificationService::with_status(status),
            navigator: Navigator::new(pop_command_id()),
            index_cache: IndexCache::default(),
            current_document: None,
            highlights: None,
        };

        if let Some(editor) = active {
            session.current_document = Some(editor.document_id());
            session.highlight(editor);
        }

        session.refresh_indicator();
        session.notifications.status_mut().show();

        info!(
            dialect = %session.config.dialect_language,
            document = ?session.current_document.as_ref().map(DocumentId::as_str),
            "session activated"
        );
        session
    }

    /// Ends the session, hiding the indicator
    ///
    /// Returns the notification service so hosts can flush what it holds.
    pub fn deactivate(mut self) -> NotificationService {
        self.notifications.status_mut().hide();
        info!(
            history = self.navigator.stack().len(),
            notifications = self.notifications.notification_count(),
            "session deactivated"
        );
        self.notifications
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub fn status(&self) -> &StatusItem {
        self.notifications.status()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Current breadcrumb history, oldest first
    pub fn history(&self) -> &[String] {
        self.navigator.stack().entries()
    }

    pub fn current_document(&self) -> Option<&DocumentId> {
        self.current_document.as_ref()
    }

    /// Highlights last applied, with their document
    pub fn highlights(&self) -> Option<(&DocumentId, &HighlightSet)> {
        self.highlights.as_ref().map(|(doc, set)| (doc, set))
    }

    /// Document the cached state index was built from
    pub fn cached_index_document(&self) -> Option<&DocumentId> {
        self.index_cache.document.as_ref()
    }

    /// Handles a change of the active editor
    ///
    /// Switching to an editor of another document drops the history. Losing
    /// the active editor keeps it.
    pub fn on_active_editor_changed(&mut self, editor: Option<&mut dyn ActiveEditor>) {
        let Some(editor) = editor else {
            debug!("no active editor");
            return;
        };

        let document = editor.document_id();
        if self.current_document.as_ref() != Some(&document) {
            info!(
                from = ?self.current_document.as_ref().map(DocumentId::as_str),
                to = %document,
                "active document switched"
            );
            self.current_document = Some(document);
            self.navigator.reset();
            self.refresh_indicator();
        }

        self.highlight(editor);
    }

    /// Handles an edit; only the active editor's document is rescanned
    ///
    /// A cached state index built from the edited document is dropped, so the
    /// next jump rebuilds it even when no lens request follows the edit.
    pub fn on_document_changed(
        &mut self,
        changed: &DocumentId,
        active: Option<&mut dyn ActiveEditor>,
    ) {
        self.index_cache.invalidate(changed);

        if let Some(editor) = active {
            if &editor.document_id() == changed {
                self.highlight(editor);
            }
        }
    }

    /// Lenses for a document, rebuilding the state index cache from it
    ///
    /// Returns nothing for documents outside the dialect language or when
    /// lenses are disabled.
    pub fn provide_lenses(
        &mut self,
        document: &DocumentId,
        language: &LanguageId,
        snapshot: &TextSnapshot,
    ) -> Vec<CodeLens> {
        if !self.config.lens_enabled || language != &self.config.dialect_language {
            return Vec::new();
        }

        let scan = DialectScan::run(snapshot);
        debug!(
            document = %document,
            states = scan.index.len(),
            lenses = scan.lenses.len(),
            "rescanned dialect document"
        );
        self.index_cache.replace(document.clone(), scan.index);

        let jump = jump_command_id();
        scan.lenses
            .iter()
            .map(|lens| CodeLens {
                range: lens.range(),
                command: lens.invocation(&jump),
            })
            .collect()
    }

    /// Runs one of the contributed commands against the active editor
    ///
    /// Without an active editor the command does nothing. Navigation errors
    /// are reported as error notifications before being returned.
    pub fn execute_command(
        &mut self,
        id: &CommandId,
        arguments: &[String],
        active: Option<&mut dyn ActiveEditor>,
    ) -> Result<NavigationOutcome, SessionError> {
        let command = AssistCommand::parse(id, arguments)?;

        let Some(editor) = active else {
            debug!(command = %id, "ignored command without an active editor");
            return Ok(NavigationOutcome::Unchanged);
        };

        let document = editor.document_id();
        let index = self.index_cache.ensure(&document, &*editor);
        let mut surface = SurfaceAdapter(editor);

        let result = match command {
            AssistCommand::Jump { target } => {
                self.navigator.jump(index, &mut surface, target.as_deref())
            }
            AssistCommand::Pop => self.navigator.pop_and_jump(index, &mut surface),
        };
        self.refresh_indicator();

        result.map_err(|err| {
            warn!(command = %id, error = %err, "navigation failed");
            self.notifications.error(err.to_string());
            SessionError::Navigation(err)
        })
    }

    fn highlight(&mut self, editor: &mut dyn ActiveEditor) {
        if !self.config.highlight_enabled {
            return;
        }

        let document = editor.document_id();
        let set = scan_markers(&editor.snapshot());
        for class in MarkerClass::ALL {
            editor.set_decorations(class, self.config.style(class), set.matches(class));
        }
        debug!(
            document = %document,
            todo = set.matches(MarkerClass::Todo).len(),
            fixme = set.matches(MarkerClass::Fixme).len(),
            "rescanned markers"
        );
        self.highlights = Some((document, set));
    }

    fn refresh_indicator(&mut self) {
        let view = self.navigator.indicator();
        self.notifications
            .status_mut()
            .update(view.text, view.tooltip, view.command);
    }
}
