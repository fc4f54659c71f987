//! External image store collaborator.
//!
//! The catalog only ever holds an opaque `{id, url}` reference to an image;
//! bytes live behind this trait. Deletion is best-effort from the caller's
//! point of view: a failed blob delete never rolls back a database delete.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use thiserror::Error;

use crate::domain::types::{ImageId, ImageUrl, TypeConstraintError};

/// Errors surfaced by a blob store implementation.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("image not found")]
    NotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid stored image reference: {0}")]
    InvalidReference(#[from] TypeConstraintError),
}

/// Reference to a stored image as returned by [`BlobStore::upload`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub id: ImageId,
    pub url: ImageUrl,
}

impl From<StoredImage> for crate::domain::software::ImageRef {
    fn from(stored: StoredImage) -> Self {
        Self {
            id: stored.id,
            url: stored.url,
        }
    }
}

/// An image received from a client, not yet handed to the store.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Storage backend for catalog images.
pub trait BlobStore: Send + Sync {
    /// Persist the image bytes and return an opaque reference to them.
    fn upload(&self, upload: &ImageUpload) -> Result<StoredImage, BlobStoreError>;
    /// Remove a previously stored image.
    fn delete(&self, id: &ImageId) -> Result<(), BlobStoreError>;
}

/// Filesystem-backed blob store serving files from a media directory under a
/// public base URL.
pub struct FsBlobStore {
    root: PathBuf,
    base_url: String,
    sequence: AtomicU64,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            sequence: AtomicU64::new(0),
        })
    }

    /// Stored ids keep only a sanitized extension from the client filename.
    fn next_id(&self, filename: &str) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or("bin");
        format!("{}-{sequence}.{extension}", Utc::now().timestamp_millis())
    }
}

impl BlobStore for FsBlobStore {
    fn upload(&self, upload: &ImageUpload) -> Result<StoredImage, BlobStoreError> {
        let id = self.next_id(&upload.filename);
        fs::write(self.root.join(&id), &upload.bytes)?;
        Ok(StoredImage {
            url: ImageUrl::new(format!("{}/{id}", self.base_url))?,
            id: ImageId::new(id)?,
        })
    }

    fn delete(&self, id: &ImageId) -> Result<(), BlobStoreError> {
        match fs::remove_file(self.root.join(id.as_str())) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(BlobStoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
