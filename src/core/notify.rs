//! Alert surface used to report problems to the person at the form

use std::sync::{Arc, Mutex};

/// Shows a message to the user.
///
/// Fire-and-forget: the controller never waits for an acknowledgement.
pub trait Notifier: Send + Sync {
    fn show_alert(&self, message: &str);
}

/// Notifier that writes alerts to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_alert(&self, message: &str) {
        tracing::warn!(alert = message, "user alert");
    }
}

/// Notifier that keeps every alert in memory
///
/// Clones share the same buffer, so a host can hand one clone to the
/// controller and drain the other when it redraws.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All alerts shown so far
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }

    /// The most recent alert
    pub fn last(&self) -> Option<String> {
        self.alerts
            .lock()
            .ok()
            .and_then(|alerts| alerts.last().cloned())
    }

    /// Remove and return all pending alerts
    pub fn drain(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|mut alerts| std::mem::take(&mut *alerts))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn show_alert(&self, message: &str) {
        tracing::warn!(alert = message, "user alert");
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
