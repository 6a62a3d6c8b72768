use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surgery_reminders_domain::ScheduledReminder;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: String,
    pub case_id: i64,
    pub patient_name: String,
    pub hospital_name: String,
    pub surgery_date_time: DateTime<Utc>,
    pub notify_at: DateTime<Utc>,
    pub sent: bool,
}

impl ReminderDTO {
    pub fn new(reminder: ScheduledReminder) -> Self {
        Self {
            id: reminder.id,
            case_id: reminder.case_id,
            patient_name: reminder.patient_name,
            hospital_name: reminder.hospital_name,
            surgery_date_time: reminder.surgery_date_time,
            notify_at: reminder.notify_at,
            sent: reminder.sent,
        }
    }
}
