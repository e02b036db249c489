//! Release resolution: find the release to operate on, or decide to stop.
//!
//! The branching is kept in two small decision tables so each outcome can be
//! checked without any network:
//!
//! | tag lookup | desired draft | decision                          |
//! |------------|---------------|-----------------------------------|
//! | missing    | any           | search listing                    |
//! | published  | true          | search listing, create alongside  |
//! | published  | false         | skip                              |
//! | draft      | any           | skip                              |
//!
//! | search            | listing match | plan              |
//! |-------------------|---------------|-------------------|
//! | plain / alongside | yes           | update            |
//! | plain             | no            | create fresh      |
//! | alongside         | no            | create alongside  |

use super::{DesiredState, ResolvedRelease};
use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::github::{Release, ReleaseApi};

/// What the direct tag lookup found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLookup {
    /// No release carries the tag
    Missing,
    /// A published release carries the tag
    Published,
    /// A draft release carries the tag
    Draft,
}

impl TagLookup {
    fn of(release: &Release) -> Self {
        if release.draft {
            TagLookup::Draft
        } else {
            TagLookup::Published
        }
    }
}

/// First-stage decision, taken from the tag lookup alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupDecision {
    /// Leave the existing release alone and end the run
    Skip,
    /// Scan the release listing; `alongside` is set when a published
    /// release with the same tag stays untouched next to the new draft
    Search {
        /// A published release with the tag exists
        alongside: bool,
    },
}

/// Second-stage decision: the one mutation this run performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Stop without touching anything
    Skip,
    /// Update this release in place
    Update(Release),
    /// Create a draft next to a published release with the same tag
    CreateAlongside,
    /// Create a release for a tag that has none matching
    CreateFresh,
}

/// Outcome of resolution
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The run stops here by policy; nothing was changed
    Skipped,
    /// A release was created or updated and is ready for assets
    Ready(ResolvedRelease),
}

/// Decide from the direct tag lookup
pub fn decide_lookup(lookup: TagLookup, desired_draft: bool) -> LookupDecision {
    match (lookup, desired_draft) {
        (TagLookup::Missing, _) => LookupDecision::Search { alongside: false },
        (TagLookup::Published, true) => LookupDecision::Search { alongside: true },
        (TagLookup::Published, false) => LookupDecision::Skip,
        (TagLookup::Draft, _) => LookupDecision::Skip,
    }
}

/// Decide the mutation from the first-stage decision and the listing match
pub fn plan(decision: LookupDecision, matched: Option<Release>) -> Plan {
    match (decision, matched) {
        (LookupDecision::Skip, _) => Plan::Skip,
        (LookupDecision::Search { .. }, Some(release)) => Plan::Update(release),
        (LookupDecision::Search { alongside: true }, None) => Plan::CreateAlongside,
        (LookupDecision::Search { alongside: false }, None) => Plan::CreateFresh,
    }
}

/// First release in listing order with the desired identity
pub fn find_match(releases: Vec<Release>, desired: &DesiredState) -> Option<Release> {
    releases
        .into_iter()
        .find(|r| r.matches(&desired.tag, desired.draft, desired.prerelease))
}

/// Resolve the release for `desired`, creating or updating it.
///
/// Performs at most one mutating call. Any API failure other than
/// "not found" is returned as an error.
pub async fn resolve(
    api: &dyn ReleaseApi,
    desired: &DesiredState,
    config: &RuntimeConfig,
) -> Result<Resolution> {
    let lookup = match api.find_release_by_tag(&desired.tag).await {
        Ok(existing) => {
            config.verbose_println("Release already exists for this tag.");
            config.verbose_json("Release (by tag)", &existing);
            TagLookup::of(&existing)
        }
        Err(e) if e.is_not_found() => {
            config.verbose_println(&format!("No published release for tag \"{}\".", desired.tag));
            TagLookup::Missing
        }
        Err(e) => return Err(e.into()),
    };

    let decision = decide_lookup(lookup, desired.draft);
    let matched = match decision {
        LookupDecision::Skip => None,
        LookupDecision::Search { alongside } => {
            if alongside {
                config.verbose_println(
                    "The existing release is published; a new draft will be created next to it.",
                );
            }
            search(api, desired, config).await?
        }
    };

    let options = desired.release_options();
    match plan(decision, matched) {
        Plan::Skip => {
            config.println(&format!(
                "🛑 Release for tag \"{}\" already exists and is not modified. Skipping any updates.",
                desired.tag
            ));
            Ok(Resolution::Skipped)
        }
        Plan::Update(existing) => {
            config.verbose_json("Release options (update)", &options);
            config.println(&format!(
                "🆕 Updating GitHub release for tag \"{}\".",
                desired.tag
            ));
            let release = api.update_release(existing.id, &options).await?;
            Ok(Resolution::Ready(ResolvedRelease {
                release,
                created: false,
            }))
        }
        Plan::CreateAlongside | Plan::CreateFresh => {
            config.verbose_json("Release options (create)", &options);
            config.println(&format!(
                "🌻 Creating GitHub release for tag \"{}\".",
                desired.tag
            ));
            let release = api.create_release(&options).await?;
            Ok(Resolution::Ready(ResolvedRelease {
                release,
                created: true,
            }))
        }
    }
}

/// Scan the listing for the desired identity; a 404 means "none"
async fn search(
    api: &dyn ReleaseApi,
    desired: &DesiredState,
    config: &RuntimeConfig,
) -> Result<Option<Release>> {
    let releases = match api.list_releases().await {
        Ok(releases) => releases,
        Err(e) if e.is_not_found() => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    config.verbose_json("Releases", &releases);

    let matched = find_match(releases, desired);
    if matched.is_some() {
        config.verbose_println("Found existing release by searching the listing.");
    }
    Ok(matched)
}
