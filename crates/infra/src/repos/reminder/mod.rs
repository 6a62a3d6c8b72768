mod kv;

use crate::repos::shared::repo::DeleteResult;
use chrono::{DateTime, Utc};
pub use kv::KVReminderRepo;
use surgery_reminders_domain::ScheduledReminder;

/// Persisted, ordered list of `ScheduledReminder`s.
///
/// Mutations are atomic with respect to each other within this process.
/// Separate processes sharing the same store can still lose updates.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Returns every stored reminder. Unreadable or malformed data is
    /// treated as an empty list
    async fn find_all(&self) -> Vec<ScheduledReminder>;
    async fn save_all(&self, reminders: &[ScheduledReminder]) -> anyhow::Result<()>;
    /// Marks every reminder that is due at `now` as sent and returns them.
    /// Nothing is returned unless the sent flags were stored
    async fn mark_due_as_sent(
        &self,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<ScheduledReminder>>;
    async fn insert(&self, reminder: &ScheduledReminder) -> anyhow::Result<()>;
    async fn delete_by_case(&self, case_id: i64) -> anyhow::Result<DeleteResult>;
    /// Deletes reminders whose surgery is past the retention window at `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> anyhow::Result<DeleteResult>;
}
