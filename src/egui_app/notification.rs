//! Toast Notifications
//!
//! At most one toast is visible at a time: showing a new one replaces the
//! previous, and each toast expires after a fixed time-to-live.

use std::time::{Duration, Instant};

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(message, NotificationKind::Info);
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.show_at(message, kind, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.current = Some(Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            shown_at: now,
        });
    }

    /// Visible toast, dropping it first if it has expired
    pub fn current(&mut self, now: Instant) -> Option<&Notification> {
        if self
            .current
            .as_ref()
            .is_some_and(|n| n.is_expired(self.ttl, now))
        {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Last toast shown, regardless of expiry
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
