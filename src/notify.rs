// Notification contract for user-facing feedback

use std::time::Duration;
use tracing::{error, info, warn};

/// Default auto-dismiss duration for notifications
pub const DEFAULT_NOTIFY_DURATION: Duration = Duration::from_millis(3000);

/// Notification severity class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Transient user-facing message sink
///
/// The store reports export and save outcomes here; rendering and dismissal
/// are the caller's concern. `duration` is how long the message should stay
/// visible.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity, duration: Duration);
}

/// Notifier that routes messages through the tracing subscriber
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity, _duration: Duration) {
        match severity {
            Severity::Success | Severity::Info => info!(%severity, "{}", message),
            Severity::Warning => warn!(%severity, "{}", message),
            Severity::Error => error!(%severity, "{}", message),
        }
    }
}

/// Notifier that discards every message
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _severity: Severity, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Success.to_string(), "success");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_default_duration() {
        assert_eq!(DEFAULT_NOTIFY_DURATION, Duration::from_millis(3000));
    }

    #[test]
    fn test_null_notifier_accepts_messages() {
        NullNotifier.notify("anything", Severity::Info, DEFAULT_NOTIFY_DURATION);
    }
}
