//! # release_sync
//!
//! Reconcile a single GitHub release with a declarative description.
//!
//! One run takes a tag, title, notes, draft/prerelease flags and a list of
//! local files, and brings the hosted release in line with them:
//!
//! - **Resolve**: look the tag up, fall back to scanning the release listing
//!   for the exact (tag, draft, prerelease) identity, then create or update
//!   the release. Published releases found by tag are never modified.
//! - **Synchronize**: upload each file as an asset, last file first,
//!   deleting a same-named asset beforehand. Asset failures are reported
//!   and skipped.
//!
//! ## Usage
//!
//! ```bash
//! release_sync --repo octo/hello --tag v1.0 --files 'dist/a.zip;dist/b.txt'
//! release_sync --repo octo/hello --tag v1.1 --draft --body "$(cat NOTES.md)"
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod reconcile;
pub mod source;

// Re-export main types for public API
pub use assets::LocalFile;
pub use cli::Args;
pub use config::EnvConfig;
pub use error::{ApiError, AssetError, CliError, ReleaseError, Result};
pub use github::{GitHubClient, HostConfig, ReleaseApi};
pub use reconcile::{DesiredState, Reconciler, ResolvedRelease, RunOutcome, SyncReport};
pub use source::RepositorySlug;
