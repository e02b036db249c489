//! Command line argument parsing and validation.
//!
//! Every flag also reads the matching `INPUT_*` variable, so the binary can
//! be dropped into a CI action step without a wrapper script.

use clap::Parser;
use clap::builder::FalseyValueParser;
use std::path::PathBuf;

use crate::config::EnvConfig;
use crate::error::{CliError, ReleaseError, Result};
use crate::github::{DEFAULT_API_URL, HostConfig};
use crate::reconcile::DesiredState;
use crate::source::RepositorySlug;

/// Token variables consulted when `--token` is not given
const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Create or update a GitHub release and upload its assets
#[derive(Parser, Debug, Clone)]
#[command(
    name = "release_sync",
    version,
    about = "Create or update a GitHub release and upload its assets",
    long_about = "Reconcile one GitHub release with the given tag, metadata and files.

An existing draft with the same tag, draft and prerelease flags is updated in place
and same-named assets are replaced. A published release with the tag is left alone.

Usage:
  release_sync --repo octo/hello --tag v1.0 --files 'dist/a.zip;dist/b.txt'
  release_sync --repo octo/hello --tag v1.1 --draft --name 'v1.1' --body 'Notes'"
)]
pub struct Args {
    /// Tag of the release
    #[arg(long, env = "INPUT_TAG", value_name = "TAG")]
    pub tag: String,

    /// Release title
    #[arg(long, env = "INPUT_NAME", default_value = "")]
    pub name: String,

    /// Release notes
    #[arg(long, env = "INPUT_BODY", default_value = "")]
    pub body: String,

    /// Commit SHA or branch the tag is created from
    #[arg(long, env = "INPUT_COMMIT", value_name = "REF")]
    pub commit: Option<String>,

    /// Target a draft release
    #[arg(long, env = "INPUT_DRAFT", value_parser = FalseyValueParser::new())]
    pub draft: bool,

    /// Target a prerelease
    #[arg(long, env = "INPUT_PRERELEASE", value_parser = FalseyValueParser::new())]
    pub prerelease: bool,

    /// Files to attach, separated by ';' or given repeatedly
    #[arg(long, env = "INPUT_FILES", value_delimiter = ';', value_name = "PATHS")]
    pub files: Vec<String>,

    /// Print every decision and API payload
    #[arg(short, long, env = "INPUT_VERBOSE", value_parser = FalseyValueParser::new())]
    pub verbose: bool,

    /// GitHub token (falls back to GH_TOKEN, then GITHUB_TOKEN)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Target repository: owner/repo or a GitHub URL
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.tag.trim().is_empty() {
            return Err("Release tag must not be empty".to_string());
        }

        if let Err(e) = url::Url::parse(&self.api_url) {
            return Err(format!("Invalid API URL '{}': {}", self.api_url, e));
        }

        Ok(())
    }

    /// Files to attach, in the order given, without empty entries
    pub fn file_list(&self) -> Vec<PathBuf> {
        // Kept as strings until here: clap rejects an empty path, and a
        // trailing ';' in INPUT_FILES is common.
        self.files
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// Desired release state described by these arguments
    pub fn desired_state(&self) -> DesiredState {
        DesiredState {
            tag: self.tag.trim().to_string(),
            name: self.name.clone(),
            body: self.body.clone(),
            commit: self.commit.clone().filter(|c| !c.trim().is_empty()),
            draft: self.draft,
            prerelease: self.prerelease,
            files: self.file_list(),
        }
    }

    /// Hosting API settings, with the token taken from the environment when needed
    pub fn host_config(&self, env: &EnvConfig) -> Result<HostConfig> {
        let repo = self
            .repo
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| {
                ReleaseError::Cli(CliError::MissingArgument {
                    argument: "repo".to_string(),
                })
            })?;
        let slug = RepositorySlug::parse(repo)?;

        let token = self
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| env.first_of(&TOKEN_VARS))
            .ok_or_else(|| {
                ReleaseError::Cli(CliError::MissingArgument {
                    argument: "token".to_string(),
                })
            })?;

        Ok(HostConfig {
            api_url: self.api_url.clone(),
            owner: slug.owner,
            repo: slug.repo,
            token,
        })
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, false),
        }
    }

    /// Runtime configuration that prints nothing
    pub fn quiet() -> Self {
        Self {
            output: super::OutputManager::new(false, true),
        }
    }

}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose)
    }
}

impl RuntimeConfig {
    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print message only when verbose output is enabled
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message);
    }

    /// Dump a payload as JSON when verbose output is enabled
    pub fn verbose_json<T: serde::Serialize + ?Sized>(&self, label: &str, value: &T) {
        self.output.verbose_json(label, value);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }
}
