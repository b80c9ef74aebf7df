//! Progress events emitted while an operation runs.

use tracing::debug;

/// Ordered, human-readable progress events.
///
/// Events are informational only. Each one is also logged at debug level.
#[derive(Debug, Clone, Default)]
pub struct ProgressLog {
    events: Vec<String>,
}

impl ProgressLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn event(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "pdfops::progress", "{message}");
        self.events.push(message);
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Consume the log.
    pub fn into_events(self) -> Vec<String> {
        self.events
    }
}
