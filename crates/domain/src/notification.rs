use serde::{Deserialize, Serialize};

/// Title of every native notification raised for a `ScheduledReminder`
pub const NOTIFICATION_TITLE: &str = "Surgery reminder";

/// State of the host provided native notification capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationPermission {
    /// The host has no native notification capability at all
    Unsupported,
    /// Permission has not been asked for yet
    Default,
    Granted,
    Denied,
}

impl NotificationPermission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// A `ReminderNotification` is what is handed over to the native
/// notification capability when a `ScheduledReminder` fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderNotification {
    pub title: String,
    pub body: String,
    /// Identifier hosts can use to collapse duplicate notifications.
    /// This is the id of the `ScheduledReminder`
    pub tag: String,
    pub case_id: i64,
}
