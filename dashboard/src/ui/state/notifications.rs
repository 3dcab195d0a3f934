//! Transient toast notifications.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::backend::storage::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

/// Oldest first; bounded so a failing loop can't grow it forever
#[derive(Debug)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(5)
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, kind: NotificationKind, message: String) -> Uuid {
        let id = Uuid::new_v4();
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Notification { id, kind, message });
        id
    }

    pub fn push_success(&mut self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Success, message.into())
    }

    pub fn push_error(&mut self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Error, message.into())
    }

    /// Error toast carrying the user-facing text of an API failure
    pub fn push_api_error(&mut self, error: &ApiError) -> Uuid {
        self.push_error(error.user_message())
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|notification| notification.id != id);
        self.entries.len() != before
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.entries.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
