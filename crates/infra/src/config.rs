use std::path::PathBuf;
use std::str::FromStr;
use surgery_reminders_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct NotificationWebhookConfig {
    pub url: String,
    /// Sent along with every notification so the receiver can verify the sender
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Seconds between every scan for due reminders
    pub tick_interval_secs: u64,
    /// Key under which the list of reminders is stored
    pub reminders_storage_key: String,
    /// File the reminders are persisted to. Reminders are only kept in
    /// memory when this is not set
    pub reminders_storage_path: Option<PathBuf>,
    /// Native notifications are not supported when this is not set
    pub notification_webhook: Option<NotificationWebhookConfig>,
}

pub const DEFAULT_REMINDERS_STORAGE_KEY: &str = "scheduled-notifications";

fn parse_env_or_default<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default value: {}.",
                name, value, default
            );
            default
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env_or_default("PORT", 5000);
        let tick_interval_secs = match parse_env_or_default("REMINDER_TICK_INTERVAL_SECS", 60) {
            0 => {
                warn!("REMINDER_TICK_INTERVAL_SECS cannot be 0, falling back to 60 seconds.");
                60
            }
            secs => secs,
        };
        let reminders_storage_key = non_empty_env("REMINDER_STORAGE_KEY")
            .unwrap_or_else(|| DEFAULT_REMINDERS_STORAGE_KEY.to_string());
        let reminders_storage_path = non_empty_env("REMINDER_STORAGE_PATH").map(PathBuf::from);
        if reminders_storage_path.is_none() {
            info!("Did not find REMINDER_STORAGE_PATH environment variable. Reminders will only be kept in memory.");
        }

        let notification_webhook = match non_empty_env("NOTIFICATION_WEBHOOK_URL") {
            Some(url) => {
                let key = match non_empty_env("NOTIFICATION_WEBHOOK_KEY") {
                    Some(key) => key,
                    None => {
                        info!("Did not find NOTIFICATION_WEBHOOK_KEY environment variable. Going to create one.");
                        let key = create_random_secret(16);
                        info!("Notification webhook key was generated and set to: {}", key);
                        key
                    }
                };
                Some(NotificationWebhookConfig { url, key })
            }
            None => {
                info!("Did not find NOTIFICATION_WEBHOOK_URL environment variable. Native notifications are disabled.");
                None
            }
        };

        Self {
            port,
            tick_interval_secs,
            reminders_storage_key,
            reminders_storage_path,
            notification_webhook,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_on_invalid_values() {
        std::env::set_var("SURGERY_REMINDERS_TEST_INVALID_NUMBER", "not-a-number");
        assert_eq!(
            parse_env_or_default("SURGERY_REMINDERS_TEST_INVALID_NUMBER", 60u64),
            60
        );
        std::env::set_var("SURGERY_REMINDERS_TEST_VALID_NUMBER", "30");
        assert_eq!(
            parse_env_or_default("SURGERY_REMINDERS_TEST_VALID_NUMBER", 60u64),
            30
        );
        assert_eq!(
            parse_env_or_default("SURGERY_REMINDERS_TEST_MISSING_NUMBER", 5000usize),
            5000
        );
    }

    #[test]
    fn blank_env_values_are_ignored() {
        std::env::set_var("SURGERY_REMINDERS_TEST_BLANK", "  ");
        assert!(non_empty_env("SURGERY_REMINDERS_TEST_BLANK").is_none());
        std::env::set_var("SURGERY_REMINDERS_TEST_PRESENT", "value");
        assert_eq!(
            non_empty_env("SURGERY_REMINDERS_TEST_PRESENT"),
            Some("value".to_string())
        );
    }
}
