use super::IKVRepo;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::warn;

/// Key value store persisted as a single json object on disk, so that
/// values survive process restarts.
///
/// Every write rewrites the whole file through a temporary file and a rename.
/// There is no locking across processes: two processes sharing the same file
/// can overwrite each others updates.
pub struct FileKVRepo {
    path: PathBuf,
    // Serializes access to the file within this process. Callers that read a
    // value and write it back need their own lock around both calls
    lock: Mutex<()>,
}

impl FileKVRepo {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> anyhow::Result<HashMap<String, String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(
                    "Key value file {:?} is corrupt and will be treated as empty. Err: {:?}",
                    self.path, e
                );
                Ok(HashMap::new())
            }
        }
    }

    async fn write_all(&self, values: &HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string(values)?;
        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IKVRepo for FileKVRepo {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values).await
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_all().await?;
        Ok(values.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_reopening_the_store() {
        let dir = tempfile::tempdir().expect("To create temp dir");
        let path = dir.path().join("nested").join("store.json");

        let repo = FileKVRepo::new(&path);
        repo.set("scheduled-notifications", "[]").await.unwrap();
        drop(repo);

        let repo = FileKVRepo::new(&path);
        assert_eq!(
            repo.get("scheduled-notifications").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().expect("To create temp dir");
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let repo = FileKVRepo::new(&path);
        assert!(repo.get("key").await.unwrap().is_none());

        // Next write replaces the corrupt content
        repo.set("key", "value").await.unwrap();
        assert_eq!(repo.get("key").await.unwrap(), Some("value".to_string()));
    }
}
