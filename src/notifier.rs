//! User-facing notifications.

use std::fmt;

use mockall::automock;
use tracing::{error, info};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An operation completed.
    Success,

    /// An operation failed.
    Error,

    /// Neutral status change.
    Info,
}

impl NoticeKind {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives transient messages describing the outcome of user actions.
#[automock]
pub trait Notifier: Send + Sync {
    /// Show a message.
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Notifier that emits each message as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Error => error!(target: "eventiverse::notice", %kind, "{message}"),
            NoticeKind::Success | NoticeKind::Info => {
                info!(target: "eventiverse::notice", %kind, "{message}");
            }
        }
    }
}
