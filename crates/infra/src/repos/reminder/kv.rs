use super::IReminderRepo;
use crate::repos::kv::IKVRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use surgery_reminders_domain::ScheduledReminder;
use tokio::sync::Mutex;
use tracing::{error, warn};

/// Stores all reminders as one json list under a single key
pub struct KVReminderRepo {
    kv: Arc<dyn IKVRepo>,
    key: String,
    // Held across the read and the write of every mutation
    write_lock: Mutex<()>,
}

impl KVReminderRepo {
    pub fn new(kv: Arc<dyn IKVRepo>, key: &str) -> Self {
        Self {
            kv,
            key: key.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    async fn write(&self, reminders: &[ScheduledReminder]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(reminders)?;
        self.kv.set(&self.key, &raw).await
    }

    /// Loads the list, applies `update` and stores the result, without any
    /// other mutation in between
    async fn update<T, F>(&self, update: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut Vec<ScheduledReminder>) -> T + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut reminders = self.find_all().await;
        let res = update(&mut reminders);
        self.write(&reminders).await?;
        Ok(res)
    }

    async fn delete_by<F: Fn(&ScheduledReminder) -> bool + Send>(
        &self,
        compare: F,
    ) -> anyhow::Result<DeleteResult> {
        self.update(move |reminders| {
            let before = reminders.len();
            reminders.retain(|r| !compare(r));
            DeleteResult {
                deleted_count: (before - reminders.len()) as i64,
            }
        })
        .await
    }
}

#[async_trait::async_trait]
impl IReminderRepo for KVReminderRepo {
    async fn find_all(&self) -> Vec<ScheduledReminder> {
        let raw = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Unable to read reminders at key: {}. Err: {:?}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(reminders) => reminders,
            Err(e) => {
                warn!(
                    "Discarding malformed reminders stored at key: {}. Err: {:?}",
                    self.key, e
                );
                Vec::new()
            }
        }
    }

    async fn save_all(&self, reminders: &[ScheduledReminder]) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(reminders).await
    }

    async fn mark_due_as_sent(
        &self,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<ScheduledReminder>> {
        self.update(move |reminders| {
            let mut due = Vec::new();
            for reminder in reminders.iter_mut().filter(|r| r.is_due(now)) {
                reminder.mark_sent();
                due.push(reminder.clone());
            }
            due
        })
        .await
    }

    async fn insert(&self, reminder: &ScheduledReminder) -> anyhow::Result<()> {
        let reminder = reminder.clone();
        self.update(move |reminders| reminders.push(reminder)).await
    }

    async fn delete_by_case(&self, case_id: i64) -> anyhow::Result<DeleteResult> {
        self.delete_by(|r| r.case_id == case_id).await
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> anyhow::Result<DeleteResult> {
        self.delete_by(|r| r.is_expired(now)).await
    }
}
