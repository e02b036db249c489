//! In-memory [`ReleaseApi`] that records every call

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::Mutex;

use super::api::{ApiResult, ReleaseApi};
use super::models::{Asset, Release, ReleaseOptions};
use crate::error::ApiError;

/// A call observed by [`FakeReleaseApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindByTag(String),
    List,
    Create(ReleaseOptions),
    Update(u64, ReleaseOptions),
    DeleteAsset(u64),
    Upload {
        release_id: u64,
        name: String,
        content_type: String,
        size: u64,
    },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::FindByTag(_) | Call::List)
    }
}

#[derive(Default)]
struct State {
    releases: Vec<Release>,
    calls: Vec<Call>,
    next_id: u64,
    fail_uploads: HashSet<String>,
    fail_deletes: HashSet<u64>,
    fail_lookup: Option<u16>,
    fail_list: Option<u16>,
    fail_mutation: Option<u16>,
}

/// Hosting API double with GitHub semantics: tag lookup skips drafts,
/// listing is newest first, duplicate asset names are rejected.
pub struct FakeReleaseApi {
    state: Mutex<State>,
}

impl FakeReleaseApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1000,
                ..State::default()
            }),
        }
    }

    /// Seed an existing release, newest first
    pub fn with_release(self, tag: &str, draft: bool, prerelease: bool, assets: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.bump();
            let mut release = release(id, tag, draft, prerelease);
            for name in assets {
                let asset_id = state.bump();
                release.assets.push(asset(asset_id, name, "application/octet-stream", 1));
            }
            state.releases.insert(0, release);
        }
        self
    }

    pub fn failing_upload(self, name: &str) -> Self {
        self.state.lock().unwrap().fail_uploads.insert(name.to_string());
        self
    }

    pub fn failing_deletes(self) -> Self {
        let mut state = self.state.lock().unwrap();
        let ids: Vec<u64> = state
            .releases
            .iter()
            .flat_map(|r| r.assets.iter().map(|a| a.id))
            .collect();
        state.fail_deletes.extend(ids);
        drop(state);
        self
    }

    pub fn failing_lookup(self, status: u16) -> Self {
        self.state.lock().unwrap().fail_lookup = Some(status);
        self
    }

    pub fn failing_list(self, status: u16) -> Self {
        self.state.lock().unwrap().fail_list = Some(status);
        self
    }

    pub fn failing_mutation(self, status: u16) -> Self {
        self.state.lock().unwrap().fail_mutation = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn releases(&self) -> Vec<Release> {
        self.state.lock().unwrap().releases.clone()
    }

    pub fn release(&self, id: u64) -> Option<Release> {
        self.releases().into_iter().find(|r| r.id == id)
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }
}

impl State {
    fn bump(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn fail(status: u16, operation: &str) -> ApiError {
        if status == 404 {
            ApiError::NotFound {
                resource: operation.to_string(),
            }
        } else {
            ApiError::Status {
                operation: operation.to_string(),
                status,
                message: "injected failure".to_string(),
            }
        }
    }
}

fn release(id: u64, tag: &str, draft: bool, prerelease: bool) -> Release {
    Release {
        id,
        tag_name: tag.to_string(),
        name: Some(tag.to_string()),
        draft,
        prerelease,
        upload_url: format!("https://uploads.example/releases/{id}/assets{{?name,label}}"),
        html_url: format!("https://example.invalid/releases/{id}"),
        assets: Vec::new(),
    }
}

fn asset(id: u64, name: &str, content_type: &str, size: u64) -> Asset {
    Asset {
        id,
        name: name.to_string(),
        content_type: content_type.to_string(),
        size,
        browser_download_url: format!("https://example.invalid/download/{name}"),
    }
}

#[async_trait]
impl ReleaseApi for FakeReleaseApi {
    async fn find_release_by_tag(&self, tag: &str) -> ApiResult<Release> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::FindByTag(tag.to_string()));
        if let Some(status) = state.fail_lookup {
            return Err(State::fail(status, "find release by tag"));
        }
        state
            .releases
            .iter()
            .find(|r| r.tag_name == tag && !r.draft)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("release for tag '{tag}'"),
            })
    }

    async fn list_releases(&self) -> ApiResult<Vec<Release>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List);
        if let Some(status) = state.fail_list {
            return Err(State::fail(status, "list releases"));
        }
        Ok(state.releases.clone())
    }

    async fn create_release(&self, options: &ReleaseOptions) -> ApiResult<Release> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(options.clone()));
        if let Some(status) = state.fail_mutation {
            return Err(State::fail(status, "create release"));
        }
        let id = state.bump();
        let mut created = release(id, &options.tag_name, options.draft, options.prerelease);
        created.name = Some(options.name.clone());
        state.releases.insert(0, created.clone());
        Ok(created)
    }

    async fn update_release(
        &self,
        release_id: u64,
        options: &ReleaseOptions,
    ) -> ApiResult<Release> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update(release_id, options.clone()));
        if let Some(status) = state.fail_mutation {
            return Err(State::fail(status, "update release"));
        }
        let existing = state
            .releases
            .iter_mut()
            .find(|r| r.id == release_id)
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("release {release_id}"),
            })?;
        existing.tag_name = options.tag_name.clone();
        existing.name = Some(options.name.clone());
        existing.draft = options.draft;
        existing.prerelease = options.prerelease;
        Ok(existing.clone())
    }

    async fn delete_asset(&self, asset_id: u64) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DeleteAsset(asset_id));
        if state.fail_deletes.contains(&asset_id) {
            return Err(State::fail(500, "delete asset"));
        }
        for release in &mut state.releases {
            if let Some(pos) = release.assets.iter().position(|a| a.id == asset_id) {
                release.assets.remove(pos);
                return Ok(());
            }
        }
        Err(ApiError::NotFound {
            resource: format!("asset {asset_id}"),
        })
    }

    async fn upload_asset(
        &self,
        upload_url: &str,
        name: &str,
        content_type: &str,
        size: u64,
        content: Bytes,
    ) -> ApiResult<Asset> {
        assert_eq!(content.len() as u64, size, "size metadata must match content");

        let mut state = self.state.lock().unwrap();
        let release_id = state
            .releases
            .iter()
            .find(|r| r.upload_url == upload_url)
            .map(|r| r.id)
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("upload endpoint {upload_url}"),
            })?;
        state.calls.push(Call::Upload {
            release_id,
            name: name.to_string(),
            content_type: content_type.to_string(),
            size,
        });
        if state.fail_uploads.contains(name) {
            return Err(State::fail(502, "upload asset"));
        }
        let id = state.bump();
        let target = state
            .releases
            .iter_mut()
            .find(|r| r.id == release_id)
            .ok_or_else(|| State::fail(500, "upload asset"))?;
        if target.asset_named(name).is_some() {
            return Err(ApiError::Status {
                operation: "upload asset".to_string(),
                status: 422,
                message: "Validation Failed: already_exists".to_string(),
            });
        }
        let uploaded = asset(id, name, content_type, size);
        target.assets.push(uploaded.clone());
        Ok(uploaded)
    }
}
