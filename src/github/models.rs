//! Wire types for the GitHub releases API

use serde::{Deserialize, Serialize};

/// A release as returned by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Release ID
    pub id: u64,
    /// Tag the release points at
    pub tag_name: String,
    /// Release title
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the release is unpublished
    pub draft: bool,
    /// Whether the release is marked as a prerelease
    pub prerelease: bool,
    /// RFC 6570 template for asset uploads (e.g. `.../assets{?name,label}`)
    pub upload_url: String,
    /// Release page URL
    #[serde(default)]
    pub html_url: String,
    /// Assets currently attached
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Whether this release has the given (tag, draft, prerelease) identity
    pub fn matches(&self, tag: &str, draft: bool, prerelease: bool) -> bool {
        self.tag_name == tag && self.draft == draft && self.prerelease == prerelease
    }

    /// Find an attached asset by file name
    pub fn asset_named(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

/// A downloadable file attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID
    pub id: u64,
    /// File name, unique within a release
    pub name: String,
    /// MIME type recorded at upload
    #[serde(default)]
    pub content_type: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Public download URL
    #[serde(default)]
    pub browser_download_url: String,
}

/// Release fields sent on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseOptions {
    /// Tag name
    pub tag_name: String,
    /// Commit SHA or branch the tag is created from; omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Create or keep as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
}

/// Error payload returned by the GitHub API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_deserializes_from_api_payload() {
        let json = r#"{
            "id": 42,
            "tag_name": "v1.0",
            "name": null,
            "draft": true,
            "prerelease": false,
            "upload_url": "https://uploads.github.com/repos/o/r/releases/42/assets{?name,label}",
            "html_url": "https://github.com/o/r/releases/tag/v1.0",
            "author": { "login": "someone" },
            "assets": [
                { "id": 7, "name": "b.txt", "content_type": "text/plain", "size": 3,
                  "browser_download_url": "https://example.invalid/b.txt", "state": "uploaded" }
            ]
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.id, 42);
        assert!(release.matches("v1.0", true, false));
        assert!(!release.matches("v1.0", false, false));
        assert_eq!(release.asset_named("b.txt").map(|a| a.id), Some(7));
        assert!(release.asset_named("a.zip").is_none());
    }

    #[test]
    fn test_options_omit_empty_commit() {
        let options = ReleaseOptions {
            tag_name: "v1.0".to_string(),
            target_commitish: None,
            name: "v1.0".to_string(),
            body: String::new(),
            draft: false,
            prerelease: false,
        };
        let value = serde_json::to_value(&options).unwrap();
        assert!(value.get("target_commitish").is_none());
        assert_eq!(value["tag_name"], "v1.0");
    }
}
