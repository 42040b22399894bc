//! Single-slot, auto-dismissing notification channel.
//!
//! At most one notification is visible. Showing a new one pre-empts the
//! current one and restarts the timer; a notification hides itself once its
//! duration has elapsed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    /// Increases with every notification shown
    pub seq: u64,
}

#[derive(Debug)]
pub struct Notifier {
    duration: Duration,
    slot: Option<(Notification, Instant)>,
    next_seq: u64,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            slot: None,
            next_seq: 1,
        }
    }

    pub fn show(&mut self, kind: NotificationKind, text: impl Into<String>) -> Notification {
        self.show_at(kind, text, Instant::now())
    }

    /// Replace whatever is showing and start a fresh timer from `now`
    pub fn show_at(
        &mut self,
        kind: NotificationKind,
        text: impl Into<String>,
        now: Instant,
    ) -> Notification {
        let notification = Notification {
            kind,
            text: text.into(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.slot = Some((notification.clone(), now));
        notification
    }

    pub fn current(&self) -> Option<&Notification> {
        self.visible_at(Instant::now())
    }

    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.slot
            .as_ref()
            .filter(|(_, shown_at)| now.saturating_duration_since(*shown_at) < self.duration)
            .map(|(notification, _)| notification)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::defaults::NOTIFICATION_SECS))
    }
}
