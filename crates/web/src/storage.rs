//! Filesystem-backed media store for box photos.
//!
//! Stored paths are relative to the media root and namespaced by owner id and
//! upload time: `<user_id>/<millis>_<uuid>.<ext>`. The files are served
//! publicly under `/media/` by the router's `ServeDir`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use gripen_core::UserId;

/// Errors from the media store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored path escapes the media root or is otherwise malformed.
    #[error("invalid media path: {0}")]
    InvalidPath(String),
}

/// Filesystem media store.
#[derive(Debug, Clone)]
pub struct MediaStore {
    /// Root directory for all stored photos.
    root: PathBuf,
}

impl MediaStore {
    /// Create a media store rooted at the given directory, creating it if
    /// necessary.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the root cannot be created.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The media root directory, for mounting a `ServeDir`.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL for a stored relative path.
    #[must_use]
    pub fn public_url(path: &str) -> String {
        format!("/media/{path}")
    }

    /// Store uploaded bytes for a user and return the relative path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory or file cannot be written.
    pub async fn save(
        &self,
        user_id: UserId,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let relative = format!(
            "{user_id}/{}_{}.{extension}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        );
        let full = self.resolve(&relative)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&full).await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        debug!(path = %relative, size = bytes.len(), "stored box photo");
        Ok(relative)
    }

    /// Delete a stored photo. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` for failures other than the file being gone.
    pub async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Resolve a stored relative path against the root, rejecting traversal.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let clean = path.trim_start_matches('/');
        if clean.is_empty()
            || Path::new(clean)
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(StorageError::InvalidPath(path.to_owned()));
        }
        Ok(self.root.join(clean))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path()).await.unwrap();

        let path = store
            .save(UserId::new(7), "jpg", b"not really a jpeg")
            .await
            .unwrap();
        assert!(path.starts_with("7/"));
        assert!(path.ends_with(".jpg"));
        assert!(store.root().join(&path).exists());

        store.delete(&path).await.unwrap();
        assert!(!store.root().join(&path).exists());

        // Deleting again is fine.
        store.delete(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path()).await.unwrap();

        assert!(store.delete("../outside.jpg").await.is_err());
        assert!(store.delete("").await.is_err());
    }

    #[test]
    fn test_public_url() {
        assert_eq!(MediaStore::public_url("7/x.jpg"), "/media/7/x.jpg");
    }
}
