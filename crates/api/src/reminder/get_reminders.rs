use crate::{
    error::ReminderApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use surgery_reminders_api_structs::get_reminders::*;
use surgery_reminders_domain::ScheduledReminder;
use surgery_reminders_infra::ReminderContext;

pub async fn get_reminders_controller(
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderApiError> {
    let usecase = GetRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|e| match e {})
}

#[derive(Debug)]
pub struct GetRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<ScheduledReminder>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx.repos.reminder_repo.find_all().await)
    }
}
