use super::{
    cancel_reminders::CancelRemindersUseCase, schedule_reminder::ScheduleReminderUseCase,
};
use crate::{
    error::ReminderApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use surgery_reminders_api_structs::reschedule_reminder::*;
use surgery_reminders_domain::ScheduledReminder;
use surgery_reminders_infra::ReminderContext;

fn handle_error(e: UseCaseErrors) -> ReminderApiError {
    match e {
        UseCaseErrors::StorageError => ReminderApiError::InternalError,
    }
}

pub async fn reschedule_reminder_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderApiError> {
    let body = body.0;
    let usecase = RescheduleReminderUseCase {
        case_id: path_params.case_id,
        patient_name: body.patient_name,
        hospital_name: body.hospital_name,
        surgery_date_time: body.surgery_date_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(handle_error)
}

/// Replaces the reminders of a case whose surgery details changed.
///
/// Existing reminders are always removed, even when the new surgery time
/// is too close for a new reminder to be scheduled.
#[derive(Debug)]
pub struct RescheduleReminderUseCase {
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
impl UseCase for RescheduleReminderUseCase {
    type Response = Option<ScheduledReminder>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "RescheduleReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        let cancel = CancelRemindersUseCase {
            case_id: self.case_id,
        };
        execute(cancel, ctx)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let schedule = ScheduleReminderUseCase {
            case_id: self.case_id,
            patient_name: self.patient_name.clone(),
            hospital_name: self.hospital_name.clone(),
            surgery_date_time: self.surgery_date_time,
        };
        execute(schedule, ctx)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
