mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, NotificationWebhookConfig, DEFAULT_REMINDERS_STORAGE_KEY};
pub use repos::{
    DeleteResult, FileKVRepo, IKVRepo, IReminderRepo, InMemoryKVRepo, KVReminderRepo, Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, ManualSys, RealSys};

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    /// Native notification capability of the host
    pub notifier: Arc<dyn INotifier>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl ReminderContext {
    fn create(config: Config) -> Self {
        let repos = match &config.reminders_storage_path {
            Some(path) => Repos::create_file(path, &config.reminders_storage_key),
            None => Repos::create_inmemory(&config.reminders_storage_key),
        };
        let notifier: Arc<dyn INotifier> = match &config.notification_webhook {
            Some(webhook) => Arc::new(WebhookNotifier::new(
                webhook.url.clone(),
                webhook.key.clone(),
            )),
            None => Arc::new(DisabledNotifier {}),
        };
        Self {
            repos,
            notifier,
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context where everything lives in memory and native notifications
    /// are unsupported
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        Self {
            repos: Repos::create_inmemory(&config.reminders_storage_key),
            notifier: Arc::new(DisabledNotifier {}),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> ReminderContext {
    ReminderContext::create(Config::new())
}
