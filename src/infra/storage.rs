//! Blob storage for uploaded images.
//!
//! The store receives the raw bytes and hands back an [`ImageRef`]; the
//! rest of the application only ever sees that handle.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::config::{Config, UPLOADS_ROUTE};
use crate::domain::{id::new_id, ImageRef, ImageUpload};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `upload` under `folder` and return its handle.
    async fn put(&self, folder: &str, upload: ImageUpload) -> AppResult<ImageRef>;
}

/// Writes blobs below a local directory that the HTTP layer serves
/// at `/uploads`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.upload_dir.clone(), config.public_base_url.clone())
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, folder: &str, upload: ImageUpload) -> AppResult<ImageRef> {
        let extension = upload.extension()?;
        let filename = format!("{}.{}", new_id(), extension);

        let dir = self.root.join(folder);
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(&filename), &upload.bytes).await?;

        tracing::debug!(folder, filename = %filename, bytes = upload.bytes.len(), "Stored upload");

        Ok(ImageRef {
            path: format!(
                "{}{}/{}/{}",
                self.public_base_url, UPLOADS_ROUTE, folder, filename
            ),
            filename,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FOLDER_USERS;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("credence-blob-{}", new_id()))
    }

    #[tokio::test]
    async fn test_put_writes_file_and_returns_url() {
        let root = temp_root();
        let store = LocalBlobStore::new(&root, "http://localhost:3000/");
        let upload = ImageUpload {
            original_name: "avatar.PNG".to_string(),
            bytes: vec![1, 2, 3],
        };

        let image = store.put(FOLDER_USERS, upload).await.unwrap();

        assert!(image.filename.ends_with(".png"));
        assert_eq!(
            image.path,
            format!("http://localhost:3000/uploads/{}/{}", FOLDER_USERS, image.filename)
        );
        assert!(image.ensure_valid().is_ok());

        let written = fs::read(root.join(FOLDER_USERS).join(&image.filename))
            .await
            .unwrap();
        assert_eq!(written, vec![1, 2, 3]);

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_put_rejects_unsupported_format() {
        let store = LocalBlobStore::new(temp_root(), "http://localhost:3000");
        let upload = ImageUpload {
            original_name: "avatar.gif".to_string(),
            bytes: vec![1],
        };

        assert!(store.put(FOLDER_USERS, upload).await.is_err());
    }
}
