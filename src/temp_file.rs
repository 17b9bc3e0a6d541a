use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::BotResult;

/// Per-request working directory under the download root.
///
/// Removed with everything inside when dropped, so partial downloads of a
/// failed request do not pile up.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub async fn create(root: &Path) -> BotResult<Self> {
        let path = root.join(uuid::Uuid::new_v4().simple().to_string());
        fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                log::warn!("Failed to remove {}: {}", self.path.display(), e);
            }
        }
    }
}
