use crate::{
    error::ReminderApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use surgery_reminders_api_structs::cancel_reminders::*;
use surgery_reminders_infra::{DeleteResult, ReminderContext};
use tracing::{error, info};

fn handle_error(e: UseCaseErrors) -> ReminderApiError {
    match e {
        UseCaseErrors::StorageError => ReminderApiError::InternalError,
    }
}

pub async fn cancel_reminders_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderApiError> {
    let case_id = path_params.case_id;
    let usecase = CancelRemindersUseCase { case_id };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                case_id,
                deleted_count: res.deleted_count,
            })
        })
        .map_err(handle_error)
}

/// Removes every reminder of a case. Cancelling a case without any
/// reminders is not an error
#[derive(Debug)]
pub struct CancelRemindersUseCase {
    pub case_id: i64,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelRemindersUseCase {
    type Response = DeleteResult;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "CancelReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        let res = ctx
            .repos
            .reminder_repo
            .delete_by_case(self.case_id)
            .await
            .map_err(|e| {
                error!(
                    "Unable to cancel reminders for case {}. Err: {:?}",
                    self.case_id, e
                );
                UseCaseErrors::StorageError
            })?;

        if res.deleted_count > 0 {
            info!(
                "Cancelled {} reminder(s) for case {}",
                res.deleted_count, self.case_id
            );
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::schedule_reminder::ScheduleReminderUseCase;
    use crate::shared::test_utils::{setup, start_time};
    use chrono::Duration;
    use surgery_reminders_domain::NotificationPermission;

    #[actix_web::test]
    async fn cancels_only_the_given_case() {
        let test = setup(NotificationPermission::Default);
        for case_id in &[1, 2, 1] {
            let usecase = ScheduleReminderUseCase {
                case_id: *case_id,
                patient_name: format!("Patient {}", case_id),
                hospital_name: "Hospital Roosevelt".into(),
                surgery_date_time: start_time() + Duration::hours(10),
            };
            execute(usecase, &test.ctx).await.unwrap();
        }

        let res = execute(CancelRemindersUseCase { case_id: 1 }, &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 2);

        let remaining = test.ctx.repos.reminder_repo.find_all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].case_id, 2);

        // Cancelling again is a no-op
        let res = execute(CancelRemindersUseCase { case_id: 1 }, &test.ctx)
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 0);
        assert_eq!(test.ctx.repos.reminder_repo.find_all().await.len(), 1);
    }
}
