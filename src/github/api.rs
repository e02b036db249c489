//! Hosting API seam used by the reconciler

use async_trait::async_trait;
use bytes::Bytes;

use super::models::{Asset, Release, ReleaseOptions};
use crate::error::ApiError;

/// Result of a single hosting API call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Release operations against one repository.
///
/// Repository coordinates are bound at construction; every method issues
/// exactly one logical request (listing may span several pages).
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// Look up the published release for a tag.
    ///
    /// Returns [`ApiError::NotFound`] when no release carries the tag.
    async fn find_release_by_tag(&self, tag: &str) -> ApiResult<Release>;

    /// List every release in hosting order (newest first).
    async fn list_releases(&self) -> ApiResult<Vec<Release>>;

    /// Create a release.
    async fn create_release(&self, options: &ReleaseOptions) -> ApiResult<Release>;

    /// Overwrite the metadata of an existing release.
    async fn update_release(&self, release_id: u64, options: &ReleaseOptions)
    -> ApiResult<Release>;

    /// Delete a release asset.
    async fn delete_asset(&self, asset_id: u64) -> ApiResult<()>;

    /// Upload a file as a release asset.
    async fn upload_asset(
        &self,
        upload_url: &str,
        name: &str,
        content_type: &str,
        size: u64,
        content: Bytes,
    ) -> ApiResult<Asset>;
}
