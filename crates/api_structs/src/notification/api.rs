use serde::{Deserialize, Serialize};
use surgery_reminders_domain::NotificationPermission;

pub mod request_notification_permission {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub granted: bool,
        pub permission: NotificationPermission,
    }

    impl APIResponse {
        pub fn new(permission: NotificationPermission) -> Self {
            Self {
                granted: permission.is_granted(),
                permission,
            }
        }
    }
}
