mod file;
mod inmemory;

pub use file::FileKVRepo;
pub use inmemory::InMemoryKVRepo;

/// String key to string value store. Values are usually serialized json
#[async_trait::async_trait]
pub trait IKVRepo: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs the same queries against every store implementation
    fn create_repos(dir: &tempfile::TempDir) -> Vec<Box<dyn IKVRepo>> {
        vec![
            Box::new(InMemoryKVRepo::new()),
            Box::new(FileKVRepo::new(dir.path().join("store.json"))),
        ]
    }

    #[tokio::test]
    async fn test_kv_queries() {
        let dir = tempfile::tempdir().expect("To create temp dir");

        for repo in create_repos(&dir) {
            assert!(repo.get("1").await.unwrap().is_none());

            assert!(repo.set("1", "1").await.is_ok());
            assert!(repo.set("2", "2").await.is_ok());
            assert_eq!(repo.get("1").await.unwrap(), Some("1".to_string()));
            assert_eq!(repo.get("2").await.unwrap(), Some("2".to_string()));

            // Overwrite
            assert!(repo.set("1", "3").await.is_ok());
            assert_eq!(repo.get("1").await.unwrap(), Some("3".to_string()));
            assert_eq!(repo.get("2").await.unwrap(), Some("2".to_string()));
        }
    }
}
