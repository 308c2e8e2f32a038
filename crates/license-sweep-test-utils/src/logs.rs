//! Capture tracing events for assertions.
//!
//! Install with [`LogCapture::dispatch`] (scoped to one test through
//! `tracing::dispatcher::with_default` or `WithSubscriber`), run the code,
//! then query the captured entries.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// A captured log entry.
#[derive(Debug, Clone)]
pub struct CapturedLog {
    pub level: Level,
    pub target: String,
    pub message: String,
    /// Event fields other than the message, formatted with `Display` when
    /// recorded as strings and `Debug` otherwise
    pub fields: Vec<(String, String)>,
}

impl CapturedLog {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Shared buffer of captured events.
///
/// Clone this to keep a handle while the layer owns another.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<CapturedLog>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self) -> LogCaptureLayer {
        LogCaptureLayer {
            capture: self.clone(),
        }
    }

    /// A subscriber feeding only this capture
    pub fn dispatch(&self) -> Dispatch {
        Dispatch::new(tracing_subscriber::registry().with(self.layer()))
    }

    pub fn entries(&self) -> Vec<CapturedLog> {
        self.buffer.lock().unwrap().clone()
    }

    /// Entries at exactly `level`
    pub fn at(&self, level: Level) -> Vec<CapturedLog> {
        self.entries()
            .into_iter()
            .filter(|log| log.level == level)
            .collect()
    }

    /// Whether an entry at `level` contains `text` in its message
    pub fn contains(&self, level: Level, text: &str) -> bool {
        self.at(level).iter().any(|log| log.message.contains(text))
    }

    /// Number of entries at `level` whose message contains `text`
    pub fn count(&self, level: Level, text: &str) -> usize {
        self.at(level)
            .iter()
            .filter(|log| log.message.contains(text))
            .count()
    }

    fn push(&self, log: CapturedLog) {
        self.buffer.lock().unwrap().push(log);
    }
}

/// Visitor that splits the message from the other fields.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            write!(&mut self.message, "{:?}", value).ok();
        } else {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

/// Tracing layer recording every event into a [`LogCapture`].
#[derive(Debug, Clone)]
pub struct LogCaptureLayer {
    capture: LogCapture,
}

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        self.capture.push(CapturedLog {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_message_and_fields() {
        let capture = LogCapture::new();
        tracing::dispatcher::with_default(&capture.dispatch(), || {
            tracing::warn!(region = %"us-ashburn-1", count = 3, "Region skipped");
            tracing::info!("Done");
        });

        let warnings = capture.at(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Region skipped");
        assert_eq!(warnings[0].field("region"), Some("us-ashburn-1"));
        assert_eq!(warnings[0].field("count"), Some("3"));
        assert!(capture.contains(Level::INFO, "Done"));
        assert_eq!(capture.count(Level::ERROR, ""), 0);
    }

    #[test]
    fn test_empty_capture() {
        assert!(LogCapture::new().entries().is_empty());
    }
}
