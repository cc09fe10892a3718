//! Outbound user-facing signals: transient notifications and navigation.

use tracing::{error, info};

use crate::dispatch::NavigationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Toast-style delivery of short messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Receives the redirect requested when a wizard completes.
pub trait Navigator: Send + Sync {
    fn schedule(&self, request: &NavigationRequest);
}

/// Writes notifications to the tracing log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(title = %notification.title, "{}", notification.description)
            }
            NotificationKind::Error => {
                error!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn schedule(&self, request: &NavigationRequest) {
        info!(
            route = %request.route,
            delay_ms = request.delay.as_millis() as u64,
            "navigation scheduled"
        );
    }
}
