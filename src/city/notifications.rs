//! Notifications raised by settlements

use serde::{Deserialize, Serialize};

use crate::core::types::SettlementId;

/// Category tag, used by the presentation layer to pick an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationCategory {
    Starving,
    Grown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub settlement: SettlementId,
    pub category: NotificationCategory,
    pub message: String,
}

impl Notification {
    pub fn starving(settlement: SettlementId, name: &str) -> Self {
        Self {
            settlement,
            category: NotificationCategory::Starving,
            message: format!("{} is starving!", name),
        }
    }

    pub fn grown(settlement: SettlementId, name: &str) -> Self {
        Self {
            settlement,
            category: NotificationCategory::Grown,
            message: format!("{} has grown!", name),
        }
    }
}

/// Notifications waiting to be delivered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outbox {
    pending: Vec<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(
            category = ?notification.category,
            "{}",
            notification.message
        );
        self.pending.push(notification);
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Take every pending notification
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
