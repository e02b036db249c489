//! GitHub REST client implementing [`ReleaseApi`]

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue, LINK,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

use super::api::{ApiResult, ReleaseApi};
use super::models::{ApiErrorBody, Asset, Release, ReleaseOptions};
use crate::error::{ApiError, CliError, ReleaseError, Result};

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: u32 = 100;

/// Connection settings for the hosting API
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// API base URL
    pub api_url: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Access token
    pub token: String,
}

impl HostConfig {
    /// `owner/repo` form of the target repository
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// One-time initialization guard for the rustls crypto provider
static RUSTLS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// GitHub releases client bound to one repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    config: HostConfig,
}

impl GitHubClient {
    /// Create a client for the configured repository
    pub fn new(config: HostConfig) -> Result<Self> {
        RUSTLS_INITIALIZED.get_or_init(|| {
            // Another provider already installed is fine; reqwest uses whichever is set.
            let _ = rustls::crypto::ring::default_provider().install_default();
        });

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(|_| {
            ReleaseError::Cli(CliError::InvalidArguments {
                reason: "GitHub token contains characters not allowed in an HTTP header"
                    .to_string(),
            })
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ReleaseError::Cli(CliError::ExecutionFailed {
                    command: "github_client_init".to_string(),
                    reason: e.to_string(),
                })
            })?;

        Ok(Self { http, config })
    }

    /// Target repository settings
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            path
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Send a request and turn non-success statuses into [`ApiError`]s
    async fn send(&self, operation: &str, request: RequestBuilder) -> ApiResult<Response> {
        log::debug!("{operation}");

        let response = request.send().await.map_err(|source| ApiError::Transport {
            operation: operation.to_string(),
            source,
        })?;

        let status = response.status();
        log::debug!("{operation} -> {status}");

        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                resource: operation.to_string(),
            });
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        Err(ApiError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> ApiResult<T> {
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            operation: operation.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ReleaseApi for GitHubClient {
    async fn find_release_by_tag(&self, tag: &str) -> ApiResult<Release> {
        let base = self.repo_url("/releases/tags");
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base.clone(),
            reason,
        };
        let mut url = url::Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot carry a path".to_string()))?
            .push(tag);

        let operation = format!("GET {url}");
        let response = self
            .send(&operation, self.request(Method::GET, url.as_str()))
            .await?;
        Self::decode(&operation, response).await
    }

    async fn list_releases(&self) -> ApiResult<Vec<Release>> {
        let mut releases = Vec::new();
        let mut next = Some(self.repo_url(&format!("/releases?per_page={PAGE_SIZE}")));

        while let Some(url) = next.take() {
            let operation = format!("GET {url}");
            let response = self.send(&operation, self.request(Method::GET, &url)).await?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page_url);

            let page: Vec<Release> = Self::decode(&operation, response).await?;
            releases.extend(page);
        }

        Ok(releases)
    }

    async fn create_release(&self, options: &ReleaseOptions) -> ApiResult<Release> {
        let url = self.repo_url("/releases");
        let operation = format!("POST {url}");
        let request = self.request(Method::POST, &url).json(options);
        let response = self.send(&operation, request).await?;
        Self::decode(&operation, response).await
    }

    async fn update_release(
        &self,
        release_id: u64,
        options: &ReleaseOptions,
    ) -> ApiResult<Release> {
        let url = self.repo_url(&format!("/releases/{release_id}"));
        let operation = format!("PATCH {url}");
        let request = self.request(Method::PATCH, &url).json(options);
        let response = self.send(&operation, request).await?;
        Self::decode(&operation, response).await
    }

    async fn delete_asset(&self, asset_id: u64) -> ApiResult<()> {
        let url = self.repo_url(&format!("/releases/assets/{asset_id}"));
        let operation = format!("DELETE {url}");
        self.send(&operation, self.request(Method::DELETE, &url))
            .await
            .map(|_| ())
    }

    async fn upload_asset(
        &self,
        upload_url: &str,
        name: &str,
        content_type: &str,
        size: u64,
        content: Bytes,
    ) -> ApiResult<Asset> {
        let url = asset_upload_url(upload_url, name)?;
        let operation = format!("POST {}", url.as_str());
        let request = self
            .request(Method::POST, url.as_str())
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, size.to_string())
            .body(content);
        let response = self.send(&operation, request).await?;
        Self::decode(&operation, response).await
    }
}

/// Expand a release `upload_url` template into the concrete URL for one file.
///
/// GitHub hands out `https://uploads.github.com/.../assets{?name,label}`;
/// the template part is dropped and `name` is added as a query parameter.
pub fn asset_upload_url(template: &str, name: &str) -> ApiResult<url::Url> {
    let base = template.split('{').next().unwrap_or(template);
    let mut url = url::Url::parse(base).map_err(|e| ApiError::InvalidUrl {
        url: template.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("name", name);
    Ok(url)
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header
pub fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
