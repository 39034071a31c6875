//! Alert sinks.
//!
//! The reconciler never surfaces errors to its caller; it pushes a message
//! to an [`AlertSink`] instead.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use tracing::error;

/// Fire-and-forget receiver of user-facing failure messages.
pub trait AlertSink: Send + Sync {
    fn push(&self, message: String);
}

/// One stored alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub created_at: OffsetDateTime,
}

/// In-memory alert list, newest last.
///
/// Alerts stay until cleared by id.
#[derive(Debug, Default)]
pub struct AlertLog {
    inner: Mutex<AlertLogInner>,
}

#[derive(Debug, Default)]
struct AlertLogInner {
    next_id: u64,
    alerts: BTreeMap<u64, Alert>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().alerts.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().alerts.is_empty()
    }

    /// Remove an alert. Returns `false` if the id was unknown.
    pub fn clear_alert(&self, id: u64) -> bool {
        self.lock().alerts.remove(&id).is_some()
    }

    fn lock(&self) -> MutexGuard<'_, AlertLogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlertSink for AlertLog {
    fn push(&self, message: String) {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.alerts.insert(
            id,
            Alert {
                id,
                message,
                created_at: OffsetDateTime::now_utc(),
            },
        );
    }
}

/// Sink for headless deployments: every alert becomes an error log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn push(&self, message: String) {
        error!(alert = %message, "Channel alert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_log_push_and_clear() {
        let log = AlertLog::new();
        assert!(log.is_empty());

        log.push("first".to_owned());
        log.push("second".to_owned());
        let alerts = log.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].message, "first");
        assert!(alerts[0].id < alerts[1].id);

        assert!(log.clear_alert(alerts[0].id));
        assert!(!log.clear_alert(alerts[0].id));
        assert_eq!(log.len(), 1);
    }
}
