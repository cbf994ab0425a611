//! Media store: uploaded documents and images on the local filesystem.
//!
//! Files are written under an opaque generated name (`<32 hex>[.<ext>]`); the
//! client-supplied file name is only recorded in `index.json`, never used as a
//! path. Lookups accept nothing but the opaque format.

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

const INDEX_FILE: &str = "index.json";
const MAX_EXT_LEN: usize = 8;

/// Index entry kept for every stored file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredMedia {
    pub original_name: String,
    pub content_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// Bytes plus the content type to serve them with.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct MediaStore {
    root: PathBuf,
    index: Arc<JsonMapStore<String, StoredMedia>>,
    default_content_type: String,
}

impl MediaStore {
    /// Open (or create) a store rooted at `root`.
    pub async fn open<P: Into<PathBuf>>(root: P, default_content_type: &str) -> Result<Self, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        let index = JsonMapStore::new(root.join(INDEX_FILE)).await?;
        Ok(Self { root, index, default_content_type: default_content_type.to_string() })
    }

    pub async fn from_config(cfg: &configs::MediaConfig) -> Result<Self, ServiceError> {
        Self::open(&cfg.uploads_dir, &cfg.default_content_type).await
    }

    /// Persist `bytes` and return the generated stored name.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(&self, original_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Result<String, ServiceError> {
        let ext = safe_extension(original_name);
        let stored_name = match &ext {
            Some(ext) => format!("{}.{}", Uuid::new_v4().simple(), ext),
            None => Uuid::new_v4().simple().to_string(),
        };

        let content_type = content_type
            .filter(|ct| is_mime(ct))
            .map(str::to_string)
            .or_else(|| ext.as_deref().and_then(guess_content_type).map(str::to_string))
            .unwrap_or_else(|| self.default_content_type.clone());

        let path = self.root.join(&stored_name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        file.write_all(bytes).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        file.flush().await.map_err(|e| ServiceError::Storage(e.to_string()))?;

        let entry = StoredMedia {
            original_name: original_name.to_string(),
            content_type,
            size: bytes.len() as u64,
            created_at: Utc::now(),
        };
        if let Err(e) = self.index.insert(stored_name.clone(), entry).await {
            if let Err(cleanup) = fs::remove_file(&path).await {
                error!(%stored_name, err = %cleanup, "failed to remove unindexed media file");
            }
            return Err(e);
        }
        debug!(%stored_name, "media saved");
        Ok(stored_name)
    }

    /// Read a stored file. Names outside the opaque format are treated as absent.
    pub async fn load(&self, stored_name: &str) -> Result<Option<MediaFile>, ServiceError> {
        if !is_stored_name(stored_name) {
            return Ok(None);
        }
        let bytes = match fs::read(self.root.join(stored_name)).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ServiceError::Storage(e.to_string())),
        };
        let content_type = self
            .index
            .get(&stored_name.to_string())
            .await
            .map(|m| m.content_type)
            .unwrap_or_else(|| self.default_content_type.clone());
        Ok(Some(MediaFile { bytes, content_type }))
    }

    /// Index entry for a stored name, if any.
    pub async fn describe(&self, stored_name: &str) -> Option<StoredMedia> {
        if !is_stored_name(stored_name) {
            return None;
        }
        self.index.get(&stored_name.to_string()).await
    }

    /// Delete a stored file and its index entry; returns whether anything was removed.
    pub async fn remove(&self, stored_name: &str) -> Result<bool, ServiceError> {
        if !is_stored_name(stored_name) {
            return Ok(false);
        }
        let file_removed = match fs::remove_file(self.root.join(stored_name)).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(ServiceError::Storage(e.to_string())),
        };
        let indexed = self.index.remove(&stored_name.to_string()).await?;
        Ok(file_removed || indexed)
    }
}

/// `<32 lowercase hex>` optionally followed by `.<1..=8 lowercase alnum>`.
pub fn is_stored_name(name: &str) -> bool {
    let (stem, ext) = match name.split_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (name, None),
    };
    let stem_ok = stem.len() == 32 && stem.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    let ext_ok = match ext {
        None => true,
        Some(ext) => {
            !ext.is_empty()
                && ext.len() <= MAX_EXT_LEN
                && ext.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        }
    };
    stem_ok && ext_ok
}

/// Extension of the client name if it is short ASCII alphanumeric, lower-cased.
fn safe_extension(original_name: &str) -> Option<String> {
    // clients may send full Windows or POSIX paths
    let base = original_name.rsplit(['/', '\\']).next().unwrap_or(original_name);
    let (_, ext) = base.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > MAX_EXT_LEN || !ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn is_mime(ct: &str) -> bool {
    match ct.split_once('/') {
        Some((t, s)) => !t.trim().is_empty() && !s.trim().is_empty() && !ct.contains(['\r', '\n']),
        None => false,
    }
}

fn guess_content_type(ext: &str) -> Option<&'static str> {
    match ext {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
