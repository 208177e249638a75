//! Notification dispatcher
//!
//! Pushes one structured text message per ticket event to a single
//! configured LINE channel. Delivery is fire-and-forget: failures become a
//! `false` result, never an error, and never roll back the mutation that
//! triggered them.

mod line_client;

use async_trait::async_trait;

pub use line_client::LineNotifier;

/// Outbound ticket event label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyEvent {
    NewRequest,
    Completed,
    ReNotify,
}

impl NotifyEvent {
    pub fn label(&self) -> &'static str {
        match self {
            NotifyEvent::NewRequest => "New Request",
            NotifyEvent::Completed => "Completed",
            NotifyEvent::ReNotify => "Re-Notify",
        }
    }
}

/// Fields formatted into one message body
#[derive(Debug, Clone)]
pub struct NotifyMessage {
    pub event: NotifyEvent,
    pub work_order: String,
    pub serial_number: String,
    pub model: String,
    pub failure: String,
    pub actor: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message. Returns whether delivery was confirmed.
    async fn send(&self, message: NotifyMessage) -> bool;
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records messages instead of sending; delivery outcome is scripted.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<NotifyMessage>>,
        pub fail_delivery: std::sync::atomic::AtomicBool,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<NotifyEvent> {
            self.sent.lock().unwrap().iter().map(|m| m.event).collect()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, message: NotifyMessage) -> bool {
            self.sent.lock().unwrap().push(message);
            !self.fail_delivery.load(std::sync::atomic::Ordering::Relaxed)
        }
    }
}
