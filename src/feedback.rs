//! Toast notifications, the activity log and the small status indicators
//! that every view writes to.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const ACTIVITY_LOG_CAPACITY: usize = 20;
pub const TOAST_LIFETIME_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at >= Duration::seconds(TOAST_LIFETIME_SECS)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub severity: Severity,
}

/// Most-recent-first log; the oldest entry is evicted past capacity.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }
}

#[derive(Debug, Default)]
struct FeedbackState {
    toasts: Vec<Toast>,
    activity: ActivityLog,
    last_response_ms: Option<u64>,
    config_warning: bool,
}

/// Everything the front end polls to render notifications.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackSnapshot {
    pub toasts: Vec<Toast>,
    pub activity: Vec<ActivityEntry>,
    pub last_response_ms: Option<u64>,
    pub config_warning: bool,
}

/// Cloneable handle to the shared notification state.
///
/// The lock is only held for the duration of a single push or read and never
/// across an await point.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    state: Arc<Mutex<FeedbackState>>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FeedbackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        self.toast_at(kind, message, Utc::now())
    }

    pub fn toast_at(&self, kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            shown_at: now,
        };
        let id = toast.id;
        let mut state = self.lock();
        state.toasts.retain(|t| !t.expired_at(now));
        state.toasts.push(toast);
        id
    }

    pub fn info(&self, message: impl Into<String>) {
        self.toast(ToastKind::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.toast(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.toast(ToastKind::Error, message);
    }

    /// Remove a toast before it expires. Returns false if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut state = self.lock();
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        state.toasts.len() != before
    }

    pub fn active_toasts_at(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut state = self.lock();
        state.toasts.retain(|t| !t.expired_at(now));
        state.toasts.clone()
    }

    pub fn log(&self, message: impl Into<String>, severity: Severity) {
        self.lock().activity.push(ActivityEntry {
            timestamp: Utc::now(),
            message: message.into(),
            severity,
        });
    }

    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.lock().activity.entries().cloned().collect()
    }

    pub fn record_response_time(&self, elapsed_ms: u64) {
        self.lock().last_response_ms = Some(elapsed_ms);
    }

    pub fn last_response_ms(&self) -> Option<u64> {
        self.lock().last_response_ms
    }

    pub fn set_config_warning(&self, shown: bool) {
        self.lock().config_warning = shown;
    }

    pub fn config_warning(&self) -> bool {
        self.lock().config_warning
    }

    pub fn snapshot(&self) -> FeedbackSnapshot {
        let now = Utc::now();
        let mut state = self.lock();
        state.toasts.retain(|t| !t.expired_at(now));
        FeedbackSnapshot {
            toasts: state.toasts.clone(),
            activity: state.activity.entries().cloned().collect(),
            last_response_ms: state.last_response_ms,
            config_warning: state.config_warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_log_is_capped_and_most_recent_first() {
        let feedback = Feedback::new();
        for i in 1..=21 {
            feedback.log(format!("entry {i}"), Severity::Info);
        }

        let entries = feedback.activity();
        assert_eq!(entries.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(entries[0].message, "entry 21");
        assert_eq!(entries[19].message, "entry 2");
        assert!(entries.iter().all(|e| e.message != "entry 1"));
    }

    #[test]
    fn toasts_expire_after_three_seconds() {
        let feedback = Feedback::new();
        let start = Utc::now();
        feedback.toast_at(ToastKind::Success, "saved", start);

        let shortly = start + Duration::milliseconds(2_999);
        assert_eq!(feedback.active_toasts_at(shortly).len(), 1);

        let later = start + Duration::seconds(3);
        assert!(feedback.active_toasts_at(later).is_empty());
    }

    #[test]
    fn dismissed_toast_is_removed() {
        let feedback = Feedback::new();
        let id = feedback.toast(ToastKind::Info, "hello");
        assert!(feedback.dismiss(id));
        assert!(!feedback.dismiss(id));
        assert!(feedback.snapshot().toasts.is_empty());
    }

    #[test]
    fn response_time_and_banner_are_tracked() {
        let feedback = Feedback::new();
        assert_eq!(feedback.last_response_ms(), None);
        feedback.record_response_time(42);
        feedback.set_config_warning(true);

        let snapshot = feedback.snapshot();
        assert_eq!(snapshot.last_response_ms, Some(42));
        assert!(snapshot.config_warning);
    }
}
