//! Asset synchronization for a resolved release

use std::path::{Path, PathBuf};

use super::ResolvedRelease;
use crate::assets::LocalFile;
use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::github::{Asset, ReleaseApi};

/// What happened to the assets during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Asset names uploaded successfully, in upload order
    pub uploaded: Vec<String>,
    /// Asset names whose previous version was deleted first
    pub replaced: Vec<String>,
    /// Asset names whose previous version could not be deleted
    pub failed_deletes: Vec<String>,
    /// Asset names that could not be uploaded
    pub failed_uploads: Vec<String>,
}

impl SyncReport {
    /// Whether every delete and upload succeeded
    pub fn is_clean(&self) -> bool {
        self.failed_deletes.is_empty() && self.failed_uploads.is_empty()
    }
}

/// Upload `files` to the release, replacing same-named assets.
///
/// Files are taken from the end of the list, each exactly once. Delete and
/// upload failures are reported as warnings and recorded in the returned
/// [`SyncReport`]; only an unreadable local file aborts.
pub async fn sync_assets(
    api: &dyn ReleaseApi,
    target: &ResolvedRelease,
    files: &[PathBuf],
    config: &RuntimeConfig,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    // A release created by this run has nothing to replace.
    let mut known: Vec<Asset> = if target.created {
        Vec::new()
    } else {
        target.release.assets.clone()
    };

    let mut pending: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
    while let Some(path) = pending.pop() {
        let file = LocalFile::read(path).await?;
        sync_one(api, target, &file, &mut known, &mut report, config).await;
    }

    Ok(report)
}

async fn sync_one(
    api: &dyn ReleaseApi,
    target: &ResolvedRelease,
    file: &LocalFile,
    known: &mut Vec<Asset>,
    report: &mut SyncReport,
    config: &RuntimeConfig,
) {
    if let Some(pos) = known.iter().position(|a| a.name == file.name) {
        let existing = known[pos].clone();
        config.println(&format!(
            "🕳️ Asset \"{}\" already exists, deleting it first.",
            file.name
        ));
        config.verbose_println(&format!("Deleting asset id {}", existing.id));

        match api.delete_asset(existing.id).await {
            Ok(()) => {
                config.verbose_println(&format!("Deleted asset \"{}\"", file.name));
                known.remove(pos);
                report.replaced.push(file.name.clone());
            }
            Err(e) => {
                config.warning_println(&format!(
                    "⚠️ Failed to delete file \"{}\": {}",
                    file.name, e
                ));
                report.failed_deletes.push(file.name.clone());
            }
        }
    }

    config.println(&format!("🚧 Uploading {}.", file.name));
    config.verbose_println(&format!(
        "{} ({}, {} bytes)",
        file.path.display(),
        file.content_type,
        file.size
    ));

    match api
        .upload_asset(
            &target.release.upload_url,
            &file.name,
            &file.content_type,
            file.size,
            file.content.clone(),
        )
        .await
    {
        Ok(asset) => {
            config.verbose_json("Uploaded asset", &asset);
            known.push(asset);
            report.uploaded.push(file.name.clone());
        }
        Err(e) => {
            config.warning_println(&format!(
                "⚠️ Failed to upload file \"{}\": {}",
                file.name, e
            ));
            report.failed_uploads.push(file.name.clone());
        }
    }
}
