use crate::dtos::ReminderDTO;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surgery_reminders_domain::ScheduledReminder;

/// `reminder` is `None` when the notification time had already passed
/// and nothing was scheduled
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: Option<ReminderDTO>,
}

impl ReminderResponse {
    pub fn new(reminder: Option<ScheduledReminder>) -> Self {
        Self {
            reminder: reminder.map(ReminderDTO::new),
        }
    }
}

pub mod get_reminders {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<ScheduledReminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod schedule_reminder {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub case_id: i64,
        pub patient_name: String,
        pub hospital_name: String,
        pub surgery_date_time: DateTime<Utc>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod reschedule_reminder {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    pub struct PathParams {
        pub case_id: i64,
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub patient_name: String,
        pub hospital_name: String,
        pub surgery_date_time: DateTime<Utc>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod cancel_reminders {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    pub struct PathParams {
        pub case_id: i64,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub case_id: i64,
        pub deleted_count: i64,
    }
}
