mod base;
mod notification;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use notification::NotificationClient;
use reminder::ReminderClient;
pub use reminder::{RescheduleReminderInput, ScheduleReminderInput};
use status::StatusClient;
use std::sync::Arc;

pub use surgery_reminders_api_structs::dtos::ReminderDTO as Reminder;
pub use surgery_reminders_domain::NotificationPermission;

/// Surgery Reminders SDK
///
/// The SDK contains methods for interacting with the surgery reminders
/// server API.
#[derive(Clone)]
pub struct SurgeryRemindersSDK {
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl SurgeryRemindersSDK {
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(address.into()));
        let notification = NotificationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            notification,
            reminder,
            status,
        }
    }
}
