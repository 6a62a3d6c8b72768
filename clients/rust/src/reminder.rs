use crate::{APIResponse, BaseClient};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::sync::Arc;
use surgery_reminders_api_structs::*;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct ScheduleReminderInput {
    pub case_id: i64,
    pub patient_name: String,
    pub hospital_name: String,
    pub surgery_date_time: DateTime<Utc>,
}

pub type RescheduleReminderInput = ScheduleReminderInput;

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    /// `reminder` in the response is `None` when the surgery is too close
    /// for a reminder to be scheduled
    pub async fn schedule(
        &self,
        input: ScheduleReminderInput,
    ) -> APIResponse<schedule_reminder::APIResponse> {
        let body = schedule_reminder::RequestBody {
            case_id: input.case_id,
            patient_name: input.patient_name,
            hospital_name: input.hospital_name,
            surgery_date_time: input.surgery_date_time,
        };
        self.base
            .post_expecting_any(
                body,
                "reminders".into(),
                &[StatusCode::CREATED, StatusCode::OK],
            )
            .await
    }

    pub async fn reschedule(
        &self,
        input: RescheduleReminderInput,
    ) -> APIResponse<reschedule_reminder::APIResponse> {
        let body = reschedule_reminder::RequestBody {
            patient_name: input.patient_name,
            hospital_name: input.hospital_name,
            surgery_date_time: input.surgery_date_time,
        };
        self.base
            .put(
                body,
                format!("cases/{}/reminders", input.case_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn cancel(&self, case_id: i64) -> APIResponse<cancel_reminders::APIResponse> {
        self.base
            .delete(format!("cases/{}/reminders", case_id), StatusCode::OK)
            .await
    }
}
