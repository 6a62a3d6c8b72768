mod inmemory;
mod webhook;

pub use inmemory::InMemoryNotifier;
use surgery_reminders_domain::{NotificationPermission, ReminderNotification};
pub use webhook::WebhookNotifier;

/// Native notification capability provided by the host environment.
///
/// Callers must check `permission` before calling `show`. When the
/// capability is unsupported or denied the scheduler only broadcasts
/// reminders in-process.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    fn permission(&self) -> NotificationPermission;
    /// Asks for permission to show notifications, returns whether it was granted
    async fn request_permission(&self) -> bool;
    async fn show(&self, notification: &ReminderNotification) -> anyhow::Result<()>;
}

/// Host without any native notification capability
pub struct DisabledNotifier {}

#[async_trait::async_trait]
impl INotifier for DisabledNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Unsupported
    }

    async fn request_permission(&self) -> bool {
        false
    }

    async fn show(&self, _notification: &ReminderNotification) -> anyhow::Result<()> {
        Err(anyhow::Error::msg(
            "Native notifications are not supported by this host",
        ))
    }
}

/// Shared permission transition when a permission request is made
fn requested_permission(current: NotificationPermission) -> NotificationPermission {
    match current {
        NotificationPermission::Default => NotificationPermission::Granted,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requesting_permission_only_changes_default() {
        use NotificationPermission::*;
        assert_eq!(requested_permission(Default), Granted);
        assert_eq!(requested_permission(Granted), Granted);
        assert_eq!(requested_permission(Denied), Denied);
        assert_eq!(requested_permission(Unsupported), Unsupported);
    }

    #[tokio::test]
    async fn disabled_notifier_never_grants() {
        let notifier = DisabledNotifier {};
        assert_eq!(notifier.permission(), NotificationPermission::Unsupported);
        assert!(!notifier.request_permission().await);
        assert_eq!(notifier.permission(), NotificationPermission::Unsupported);
    }
}
