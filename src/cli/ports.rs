use pathway_core::{NavigationRequest, Navigator, Notification, NotificationKind, Notifier};

use crate::cli::output;

/// Prints notifications as status lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = format!("{}: {}", notification.title, notification.description);
        match notification.kind {
            NotificationKind::Success => output::success(line),
            NotificationKind::Error => output::error(line),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn schedule(&self, request: &NavigationRequest) {
        if request.delay.is_zero() {
            output::info(format!("Redirecting to {}", request.route));
        } else {
            output::info(format!(
                "Redirecting to {} in {:.1}s",
                request.route,
                request.delay.as_secs_f64()
            ));
        }
    }
}
