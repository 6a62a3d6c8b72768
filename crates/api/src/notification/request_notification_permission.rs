use crate::{
    error::ReminderApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use surgery_reminders_api_structs::request_notification_permission::*;
use surgery_reminders_domain::NotificationPermission;
use surgery_reminders_infra::ReminderContext;
use tracing::info;

pub async fn request_notification_permission_controller(
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderApiError> {
    let usecase = RequestNotificationPermissionUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|permission| HttpResponse::Ok().json(APIResponse::new(permission)))
        .map_err(|e| match e {})
}

/// Asks the host for permission to show native notifications.
///
/// Responds with the permission state after asking
#[derive(Debug)]
pub struct RequestNotificationPermissionUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for RequestNotificationPermissionUseCase {
    type Response = NotificationPermission;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "RequestNotificationPermission";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        if ctx.notifier.permission() == NotificationPermission::Unsupported {
            info!("Native notifications are not supported by this host");
            return Ok(NotificationPermission::Unsupported);
        }

        ctx.notifier.request_permission().await;
        Ok(ctx.notifier.permission())
    }
}
