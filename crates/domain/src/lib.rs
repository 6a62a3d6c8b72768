mod notification;
mod reminder;

pub use notification::{NotificationPermission, ReminderNotification, NOTIFICATION_TITLE};
pub use reminder::{ScheduledReminder, REMINDER_LEAD_TIME_HOURS, REMINDER_RETENTION_HOURS};
