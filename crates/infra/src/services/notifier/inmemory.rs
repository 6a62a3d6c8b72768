use super::{requested_permission, INotifier};
use std::sync::Mutex;
use surgery_reminders_domain::{NotificationPermission, ReminderNotification};

/// Keeps every shown notification in memory. Useful for local
/// simulations and tests
pub struct InMemoryNotifier {
    permission: Mutex<NotificationPermission>,
    shown: Mutex<Vec<ReminderNotification>>,
}

impl InMemoryNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn set_permission(&self, permission: NotificationPermission) {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner()) = permission;
    }

    pub fn shown(&self) -> Vec<ReminderNotification> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn request_permission(&self) -> bool {
        let mut permission = self.permission.lock().unwrap_or_else(|e| e.into_inner());
        *permission = requested_permission(*permission);
        permission.is_granted()
    }

    async fn show(&self, notification: &ReminderNotification) -> anyhow::Result<()> {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
        Ok(())
    }
}
