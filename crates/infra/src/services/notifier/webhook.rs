use super::{requested_permission, INotifier};
use reqwest::Client;
use std::sync::Mutex;
use surgery_reminders_domain::{NotificationPermission, ReminderNotification};
use tracing::info;

pub const WEBHOOK_KEY_HEADER: &str = "surgery-reminders-webhook-key";

/// Delivers native notifications by posting them to a webhook, e.g. a
/// desktop or push notification relay.
///
/// Permission starts out as `Default` and is granted on the first request.
pub struct WebhookNotifier {
    client: Client,
    url: String,
    key: String,
    permission: Mutex<NotificationPermission>,
}

impl WebhookNotifier {
    pub fn new(url: String, key: String) -> Self {
        Self {
            client: Client::new(),
            url,
            key,
            permission: Mutex::new(NotificationPermission::Default),
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn request_permission(&self) -> bool {
        let mut permission = self.permission.lock().unwrap_or_else(|e| e.into_inner());
        *permission = requested_permission(*permission);
        info!(
            "Notification webhook at {} permission: {:?}",
            self.url, *permission
        );
        permission.is_granted()
    }

    async fn show(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        self.client
            .post(&self.url)
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(notification)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
