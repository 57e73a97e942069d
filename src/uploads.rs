//! Project image storage under the managed upload directory.
//!
//! A stored image is referenced from its project by public path
//! (`/uploads/<file>`). Each file is written under a fresh name, so a file
//! belongs to exactly one project and can be removed with it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use bytes::Bytes;
use chrono::Utc;
use regex::Regex;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;

pub const PUBLIC_PREFIX: &str = "/uploads/";
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

static IMAGE_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.(jpeg|jpg|png|gif)$").unwrap());
static IMAGE_MIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^image/(jpeg|jpg|png|gif)$").unwrap());

/// A file part received in a request, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    /// Check type and size; returns the lowercased extension with its dot.
    pub fn validate(&self) -> Result<String, AppError> {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        let mime = self
            .content_type
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        if !IMAGE_EXTENSION_RE.is_match(&extension) || !IMAGE_MIME_RE.is_match(&mime) {
            return Err(AppError::UnsupportedMediaType(
                "Only image files are allowed (jpeg, jpg, png, gif)".to_string(),
            ));
        }

        if self.data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::PayloadTooLarge(
                "Image exceeds the 5MB limit".to_string(),
            ));
        }

        Ok(extension)
    }
}

/// `<millis>-<random><ext>`
pub fn generate_filename(extension: &str) -> String {
    let suffix: u32 = rand::random_range(0..1_000_000_000);
    format!("{}-{suffix}{extension}", Utc::now().timestamp_millis())
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Validate and durably write an upload. Returns its public path.
    pub async fn save(&self, upload: &ImageUpload) -> Result<String, AppError> {
        let extension = upload.validate()?;
        self.ensure_root().await?;

        let filename = generate_filename(&extension);
        let path = self.root.join(&filename);

        write_new_file(&path, &upload.data).await?;

        tracing::info!(file = %filename, bytes = upload.data.len(), "Stored upload");
        Ok(format!("{PUBLIC_PREFIX}{filename}"))
    }

    /// On-disk location of a managed public path; `None` for anything else.
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path.strip_prefix(PUBLIC_PREFIX)?;
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0'])
        {
            return None;
        }
        Some(self.root.join(name))
    }

    /// Best-effort delete of a managed file. Never fails the caller.
    pub async fn remove(&self, public_path: &str) {
        let Some(path) = self.resolve(public_path) else {
            return;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!(path = %path.display(), "Removed upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Upload already gone")
            }
            Err(e) => tracing::warn!(path = %path.display(), "Failed to remove upload: {e}"),
        }
    }
}

/// Write `data` to a file that must not exist yet. A partial file is removed;
/// an existing one is never touched.
async fn write_new_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let written = async {
        file.write_all(data).await?;
        file.sync_all().await
    }
    .await;

    if written.is_err() {
        drop(file);
        let _ = tokio::fs::remove_file(path).await;
    }
    written
}
