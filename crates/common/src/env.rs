//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the uploads directory exists and is a directory.
pub async fn ensure_uploads_dir(uploads_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(uploads_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{uploads_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%uploads_dir, "uploads directory not found; creating it");
            tokio::fs::create_dir_all(uploads_dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {uploads_dir}: {e}"))?;
            info!(%uploads_dir, "uploads directory created");
            Ok(())
        }
    }
}
