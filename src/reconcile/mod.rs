//! Release reconciliation: resolve the release, then synchronize its assets.

mod resolver;
mod synchronizer;

pub use resolver::{
    LookupDecision, Plan, Resolution, TagLookup, decide_lookup, find_match, plan, resolve,
};
pub use synchronizer::{SyncReport, sync_assets};

use serde::Serialize;
use std::path::PathBuf;

use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::github::{Release, ReleaseApi, ReleaseOptions};

/// The release this run should end up with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesiredState {
    /// Tag name
    pub tag: String,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Commit SHA or branch for the tag; `None` lets the host decide
    pub commit: Option<String>,
    /// Target a draft release
    pub draft: bool,
    /// Target a prerelease
    pub prerelease: bool,
    /// Local files to attach, in caller order
    pub files: Vec<PathBuf>,
}

impl DesiredState {
    /// Payload for create and update calls
    pub fn release_options(&self) -> ReleaseOptions {
        ReleaseOptions {
            tag_name: self.tag.clone(),
            target_commitish: self.commit.clone(),
            name: self.name.clone(),
            body: self.body.clone(),
            draft: self.draft,
            prerelease: self.prerelease,
        }
    }
}

/// A release ready for asset synchronization
#[derive(Debug, Clone)]
pub struct ResolvedRelease {
    /// The release as returned by the create or update call
    pub release: Release,
    /// Whether this run created it
    pub created: bool,
}

/// Result of a whole run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// An existing release was left alone by policy
    Skipped,
    /// The release was created or updated and its assets synchronized
    Synced {
        /// Final release state after create/update
        release: Release,
        /// Whether the release was created by this run
        created: bool,
        /// Per-asset results
        report: SyncReport,
    },
}

/// Drives one reconciliation run against a hosting API
pub struct Reconciler<'a> {
    api: &'a dyn ReleaseApi,
    config: &'a RuntimeConfig,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler
    pub fn new(api: &'a dyn ReleaseApi, config: &'a RuntimeConfig) -> Self {
        Self { api, config }
    }

    /// Resolve the release for `desired` and synchronize its assets.
    ///
    /// Errors only for failures during resolution, release create/update,
    /// or reading a local file; asset delete/upload failures end up in the
    /// [`SyncReport`].
    pub async fn run(&self, desired: &DesiredState) -> Result<RunOutcome> {
        self.config.verbose_json("Desired state", desired);

        let resolved = match resolve(self.api, desired, self.config).await? {
            Resolution::Skipped => return Ok(RunOutcome::Skipped),
            Resolution::Ready(resolved) => resolved,
        };

        let report = sync_assets(self.api, &resolved, &desired.files, self.config).await?;

        Ok(RunOutcome::Synced {
            release: resolved.release,
            created: resolved.created,
            report,
        })
    }
}
