#![no_std]

//! # Notification + Status Service
//!
//! The user-facing error-message surface and the status-bar item of the add-on.
//! Every message the add-on sends reports a failure, so messages carry no level.
//!
//! ## Philosophy
//!
//! - **Structured, not stdout**: Messages are typed events, not print statements
//! - **Fire-and-forget**: Sending a message returns nothing the sender must handle
//! - **Bounded**: History is capped; old messages fall off the front
//! - **Testable**: History and the status item can be inspected at any time
//!
//! ## Example
//!
//! ```ignore
//! use services_notification::NotificationService;
//!
//! let mut service = NotificationService::new();
//! service.error("State 'missing' not found.");
//! service.status_mut().update("$(debug-start) Ready", "State transition history", None);
//!
//! assert_eq!(service.history().count(), 1);
//! ```

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::string::String;
use core::fmt;
use dialect_types::CommandId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of notifications to keep in history
pub const MAX_NOTIFICATION_HISTORY: usize = 100;

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Creates a new notification ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notif:{}", self.0)
    }
}

/// An error message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    /// Logical send order, starting at 0 for the service's first message
    pub sequence: u64,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Side of the status bar an item sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusAlignment {
    Left,
    Right,
}

/// A status-bar item with settable text and an optional action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusItem {
    pub text: String,
    pub tooltip: String,
    /// Command run when the item is clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandId>,
    pub alignment: StatusAlignment,
    /// Higher priority items sit further towards the alignment edge
    pub priority: i64,
    pub visible: bool,
}

impl StatusItem {
    /// Creates a hidden, empty item
    pub fn new(alignment: StatusAlignment, priority: i64) -> Self {
        Self {
            text: String::new(),
            tooltip: String::new(),
            command: None,
            alignment,
            priority,
            visible: false,
        }
    }

    /// Replaces text, tooltip and action in one step
    pub fn update(
        &mut self,
        text: impl Into<String>,
        tooltip: impl Into<String>,
        command: Option<CommandId>,
    ) {
        self.text = text.into();
        self.tooltip = tooltip.into();
        self.command = command;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Notification service
pub struct NotificationService {
    /// Sent notifications, oldest first
    notifications: VecDeque<Notification>,
    status: StatusItem,
    next_sequence: u64,
}

impl NotificationService {
    /// Creates a service with a hidden left-aligned status item of priority 1
    pub fn new() -> Self {
        Self::with_status(StatusItem::new(StatusAlignment::Left, 1))
    }

    /// Creates a service around a preconfigured status item
    pub fn with_status(status: StatusItem) -> Self {
        Self {
            notifications: VecDeque::new(),
            status,
            next_sequence: 0,
        }
    }

    /// Sends an error message and returns its ID
    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        let notification = Notification {
            id: NotificationId::new(),
            message: message.into(),
            sequence: self.next_sequence,
        };
        let id = notification.id;
        self.next_sequence += 1;
        self.notifications.push_back(notification);

        while self.notifications.len() > MAX_NOTIFICATION_HISTORY {
            self.notifications.pop_front();
        }
        id
    }

    /// All retained notifications, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    pub fn status(&self) -> &StatusItem {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusItem {
        &mut self.status
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}
