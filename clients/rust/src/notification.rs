use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use surgery_reminders_api_structs::request_notification_permission;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn request_permission(
        &self,
    ) -> APIResponse<request_notification_permission::APIResponse> {
        self.base
            .post((), "notifications/permission".into(), StatusCode::OK)
            .await
    }
}
