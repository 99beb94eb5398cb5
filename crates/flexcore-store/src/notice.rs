//! Transient, auto-dismissing notifications.
//!
//! Components push a [`Notice`] into a [`Notifier`]; the host renders the
//! active ones and calls [`NoticeLog::expire`] on its tick to drop the rest.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default time a notice stays visible.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Visual flavour of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A message shown briefly, then dismissed automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub ttl: Duration,
    pub created_at: Instant,
}

impl Notice {
    /// Create a notice stamped now.
    pub fn new(text: impl Into<String>, level: NoticeLevel, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            level,
            ttl,
            created_at: Instant::now(),
        }
    }

    /// Whether the notice should no longer be shown at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

/// Destination for notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// In-memory notice queue.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice not yet pruned, oldest first.
    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Notices still visible at `now`.
    pub fn active(&self, now: Instant) -> Vec<Notice> {
        self.all().into_iter().filter(|n| !n.is_expired(now)).collect()
    }

    /// Drop notices expired at `now` and return how many were dropped.
    pub fn expire(&self, now: Instant) -> usize {
        let Ok(mut notices) = self.notices.lock() else {
            return 0;
        };
        let before = notices.len();
        notices.retain(|n| !n.is_expired(now));
        before - notices.len()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        tracing::debug!(text = %notice.text, level = ?notice.level, "notice raised");
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────
