use crate::domain::models::{Notification, NotificationLevel};
use tracing::debug;

pub fn alert_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "alert-success",
        NotificationLevel::Info => "alert-info",
        NotificationLevel::Warning => "alert-warning",
        NotificationLevel::Error => "alert-danger",
    }
}

pub fn icon(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "check-circle-fill",
        NotificationLevel::Info => "info-circle-fill",
        NotificationLevel::Warning => "exclamation-triangle-fill",
        NotificationLevel::Error => "x-circle-fill",
    }
}

/// At most one notification is visible; showing a new one replaces it.
/// Visible notifications expire `ttl_ms` after being shown.
#[derive(Debug)]
pub struct NotificationCenter {
    ttl_ms: u64,
    current: Option<Notification>,
    history: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            current: None,
            history: Vec::new(),
        }
    }

    pub fn show(&mut self, level: NotificationLevel, message: &str, now_ms: u64) {
        let n = Notification {
            level,
            message: message.to_string(),
            css_class: alert_class(level),
            icon: icon(level),
            shown_at_ms: now_ms,
        };
        debug!(level = alert_class(level), message, "notification");
        self.history.push(n.clone());
        self.current = Some(n);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn expire(&mut self, now_ms: u64) {
        if let Some(n) = &self.current {
            if now_ms.saturating_sub(n.shown_at_ms) >= self.ttl_ms {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[Notification] {
        &self.history
    }
}
