use crate::{
    error::ReminderApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use surgery_reminders_api_structs::schedule_reminder::*;
use surgery_reminders_domain::ScheduledReminder;
use surgery_reminders_infra::ReminderContext;
use tracing::{error, info};

fn handle_error(e: UseCaseErrors) -> ReminderApiError {
    match e {
        UseCaseErrors::StorageError => ReminderApiError::InternalError,
    }
}

pub async fn schedule_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderApiError> {
    let body = body.0;
    let usecase = ScheduleReminderUseCase {
        case_id: body.case_id,
        patient_name: body.patient_name,
        hospital_name: body.hospital_name,
        surgery_date_time: body.surgery_date_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| match reminder {
            Some(reminder) => HttpResponse::Created().json(APIResponse::new(Some(reminder))),
            None => HttpResponse::Ok().json(APIResponse::new(None)),
        })
        .map_err(handle_error)
}

/// Schedules a reminder `REMINDER_LEAD_TIME_HOURS` before the surgery.
///
/// Responds with `None` without storing anything when that point in time
/// has already passed.
#[derive(Debug)]
pub struct ScheduleReminderUseCase {
    pub case_id: i64,
    pub patient_name: String,
    pub hospital_name: String,
    pub surgery_date_time: DateTime<Utc>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleReminderUseCase {
    type Response = Option<ScheduledReminder>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "ScheduleReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        let reminder = match ScheduledReminder::new(
            self.case_id,
            self.patient_name.clone(),
            self.hospital_name.clone(),
            self.surgery_date_time,
            ctx.sys.now(),
        ) {
            Some(reminder) => reminder,
            None => {
                info!(
                    "Notification time for case {} is in the past, skipping",
                    self.case_id
                );
                return Ok(None);
            }
        };

        ctx.repos
            .reminder_repo
            .insert(&reminder)
            .await
            .map_err(|e| {
                error!(
                    "Unable to store reminder for case {}. Err: {:?}",
                    self.case_id, e
                );
                UseCaseErrors::StorageError
            })?;

        info!(
            "Reminder {} scheduled for case {} at {}",
            reminder.id,
            reminder.case_id,
            reminder.notify_at.to_rfc3339()
        );
        Ok(Some(reminder))
    }
}
