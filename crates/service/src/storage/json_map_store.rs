use std::{collections::HashMap, hash::Hash, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` to a JSON file. Writers hold the lock while the
/// file is rewritten, so the file always reflects a complete snapshot.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("corrupt index {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                write_snapshot(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::Storage(e.to_string())),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Number of entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let previous = map.insert(key.clone(), value);
        if let Err(e) = write_snapshot(&self.file_path, &map).await {
            // keep memory and disk in step
            match previous {
                Some(v) => { map.insert(key, v); }
                None => { map.remove(&key); }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(previous) = map.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = write_snapshot(&self.file_path, &map).await {
            map.insert(key.clone(), previous);
            return Err(e);
        }
        Ok(true)
    }
}

/// Write to a sibling temp file then rename over the target.
async fn write_snapshot<K, V>(path: &Path, map: &HashMap<K, V>) -> Result<(), ServiceError>
where
    K: Eq + Hash + serde::Serialize,
    V: serde::Serialize,
{
    let data = serde_json::to_vec(map).map_err(|e| ServiceError::Storage(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
    fs::rename(&tmp, path).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("index.json");
        let store = JsonMapStore::<String, String>::new(&path).await?;

        // initially empty, and the file exists
        assert_eq!(store.len().await, 0);
        assert!(path.exists());

        store.insert("a".into(), "1".into()).await?;
        store.insert("b".into(), "2".into()).await?;
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));

        // overwrite
        store.insert("a".into(), "10".into()).await?;

        // remove and reload persistence
        assert!(store.remove(&"b".into()).await?);
        assert!(!store.remove(&"b".into()).await?);
        let reloaded = JsonMapStore::<String, String>::new(&path).await?;
        assert_eq!(reloaded.len().await, 1);
        assert_eq!(reloaded.get(&"a".into()).await.as_deref(), Some("10"));
        Ok(())
    }

    #[tokio::test]
    async fn failed_writes_keep_memory_in_step_with_disk() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("index.json");
        let store = JsonMapStore::<String, String>::new(&path).await?;
        store.insert("a".into(), "1".into()).await?;

        // a directory where the temp file should go makes every snapshot fail
        std::fs::create_dir(path.with_extension("json.tmp"))?;

        assert!(store.remove(&"a".into()).await.is_err());
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));

        assert!(store.insert("b".into(), "2".into()).await.is_err());
        assert_eq!(store.get(&"b".into()).await, None);
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("index.json");
        tokio::fs::write(&path, b"{not json").await?;
        let res = JsonMapStore::<String, String>::new(&path).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        Ok(())
    }
}
