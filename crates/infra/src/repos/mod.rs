mod kv;
mod reminder;
mod shared;

pub use kv::{FileKVRepo, IKVRepo, InMemoryKVRepo};
pub use reminder::{IReminderRepo, KVReminderRepo};
pub use shared::repo::DeleteResult;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub kv_repo: Arc<dyn IKVRepo>,
    pub reminder_repo: Arc<dyn IReminderRepo>,
}

impl Repos {
    /// Repositories backed by a json file on disk
    pub fn create_file(path: &Path, reminders_key: &str) -> Self {
        info!("Persisting reminders to file: {:?}", path);
        Self::create_from_kv(Arc::new(FileKVRepo::new(path)), reminders_key)
    }

    pub fn create_inmemory(reminders_key: &str) -> Self {
        Self::create_from_kv(Arc::new(InMemoryKVRepo::new()), reminders_key)
    }

    fn create_from_kv(kv_repo: Arc<dyn IKVRepo>, reminders_key: &str) -> Self {
        Self {
            reminder_repo: Arc::new(KVReminderRepo::new(kv_repo.clone(), reminders_key)),
            kv_repo,
        }
    }
}
