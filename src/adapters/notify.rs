use crate::domain::ports::NotificationSink;
use std::sync::Mutex;

/// Sends user-facing messages to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn report_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Prints user-facing messages to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotificationSink;

impl NotificationSink for ConsoleNotificationSink {
    fn report_error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

/// Keeps every reported message, in order.
#[derive(Debug, Default)]
pub struct MemoryNotificationSink {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for MemoryNotificationSink {
    fn report_error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
