use shared::model::{Notification, NotificationKind};
use tracing::{info, warn};

/// Queue of user-facing notifications raised by voice actions.
///
/// Ids are monotonic per notifier. Notifications stay queued until the
/// server drains them into a response or they are removed explicitly.
#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    pending: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.next_id += 1;
        let message = message.into();

        match kind {
            NotificationKind::Error => warn!("Notification: {}", message),
            _ => info!("Notification: {}", message),
        }

        self.pending.push(Notification {
            id: self.next_id,
            message,
            kind,
        });
        self.next_id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.add(message, NotificationKind::Info)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.add(message, NotificationKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.add(message, NotificationKind::Error)
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
