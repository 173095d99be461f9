//! Ephemeral notification queue.
//!
//! Items are appended in order, removed by explicit dismissal or when their
//! optional duration has elapsed. Identical messages are never merged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Unique within its queue; derived from creation time and a counter.
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    /// `None` keeps the item until dismissed.
    pub duration: Option<Duration>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Returns whether the display duration has elapsed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let Some(duration) = self.duration else {
            return false;
        };
        match chrono::Duration::from_std(duration) {
            Ok(duration) => self.created_at + duration <= now,
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    issued: u64,
}

impl NotificationQueue {
    /// Appends a notification and returns its id.
    pub fn enqueue(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Option<Duration>,
        now: DateTime<Utc>,
    ) -> String {
        self.issued += 1;
        let id = format!("{}-{}", now.timestamp_millis(), self.issued);
        self.items.push(Notification {
            id: id.clone(),
            kind,
            message: message.into(),
            duration,
            created_at: now,
        });
        id
    }

    /// Removes the notification with `id`. Returns whether one was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Drops every notification expired at `now` and returns how many.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_expired(now));
        before - self.items.len()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
