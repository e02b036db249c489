//! GitHub integration for release reconciliation

mod api;
mod client;
#[cfg(test)]
pub(crate) mod fake;
mod models;

pub use api::{ApiResult, ReleaseApi};
pub use client::{DEFAULT_API_URL, GitHubClient, HostConfig, asset_upload_url, next_page_url};
pub use models::{Asset, Release, ReleaseOptions};
