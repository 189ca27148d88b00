//! Transient confirmation notices

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// A short message shown to the user after something succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            shown_at: Utc::now(),
        }
    }
}

/// Sink for notices (the "toast" of a UI)
pub trait Notifier: Send + Sync {
    fn show(&self, notice: Notice);
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, notice: Notice) {
        tracing::info!(notice_id = %notice.id, "{}", notice.message);
    }
}

/// Notifier that keeps every notice until drained
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all pending notices
    pub fn drain(&self) -> Vec<Notice> {
        match self.notices.write() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices
            .read()
            .map(|notices| notices.iter().map(|n| n.message.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.notices.read().map(|n| n.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeBoard {
    fn show(&self, notice: Notice) {
        tracing::debug!(notice_id = %notice.id, message = %notice.message, "Notice posted");
        match self.notices.write() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
