use std::io::{self, Write};

use eventiverse::notifier::{NoticeKind, Notifier, TracingNotifier};
use tracing::debug;

/// Prints notifications to stderr and records them as tracing events.
#[derive(Debug, Default)]
pub(crate) struct ConsoleNotifier {
    log: TracingNotifier,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.log.notify(kind, message);

        if let Err(error) = writeln!(io::stderr().lock(), "[{kind}] {message}") {
            debug!(%error, "failed to print notification");
        }
    }
}
