//! Local asset files: contents, name and content type

use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::{AssetError, Result};

/// Content type used when none can be guessed from the file name
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A local file read into memory for upload
#[derive(Debug, Clone)]
pub struct LocalFile {
    /// Source path
    pub path: PathBuf,
    /// Base name, used as the asset name
    pub name: String,
    /// Detected MIME type
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
    /// File contents
    pub content: Bytes,
}

impl LocalFile {
    /// Read a file and detect its asset name and content type
    pub async fn read(path: &Path) -> Result<Self> {
        let name = asset_name(path)?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| AssetError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| AssetError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        // The bytes we send are the source of truth for Content-Length.
        let size = content.len() as u64;
        if size != metadata.len() {
            log::debug!(
                "{} changed size while reading ({} -> {} bytes)",
                path.display(),
                metadata.len(),
                size
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            name,
            content_type: content_type_for(path),
            size,
            content: Bytes::from(content),
        })
    }
}

/// Asset name for a path: its final component
pub fn asset_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            AssetError::InvalidName {
                path: path.to_path_buf(),
            }
            .into()
        })
}

/// Guess the MIME type of a path from its extension
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}
