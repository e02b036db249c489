//! Target repository resolution (GitHub URLs, SSH remotes, owner/repo notation)

use crate::error::{CliError, ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepositorySlug {
    /// Parse `owner/repo`, `https://github.com/owner/repo[.git]` or
    /// `git@github.com:owner/repo.git`
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        static GITHUB_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(?:https?://|ssh://git@|git@)[^/:]+[/:](?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$")
                .expect("GitHub URL regex is valid")
        });

        if let Some(caps) = GITHUB_URL_RE.captures(input) {
            return Self::checked(&caps["owner"], &caps["repo"], input);
        }

        if let Some((owner, repo)) = input.split_once('/') {
            return Self::checked(owner, repo.trim_end_matches(".git"), input);
        }

        Err(invalid(input))
    }

    fn checked(owner: &str, repo: &str, input: &str) -> Result<Self> {
        let valid = |part: &str| !part.is_empty() && !part.contains('/') && !part.contains(char::is_whitespace);
        if valid(owner) && valid(repo) {
            Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            })
        } else {
            Err(invalid(input))
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn invalid(input: &str) -> ReleaseError {
    ReleaseError::Cli(CliError::InvalidArguments {
        reason: format!(
            "Invalid repository: '{}'. Use owner/repo or a GitHub URL",
            input
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(owner: &str, repo: &str) -> RepositorySlug {
        RepositorySlug {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    #[test]
    fn test_parse_owner_repo() {
        assert_eq!(RepositorySlug::parse("octo/hello").unwrap(), slug("octo", "hello"));
    }

    #[test]
    fn test_parse_https_url() {
        assert_eq!(
            RepositorySlug::parse("https://github.com/octo/hello.git").unwrap(),
            slug("octo", "hello")
        );
        assert_eq!(
            RepositorySlug::parse("https://github.com/octo/hello.js").unwrap(),
            slug("octo", "hello.js")
        );
    }

    #[test]
    fn test_parse_ssh_remote() {
        assert_eq!(
            RepositorySlug::parse("git@github.com:octo/hello.git").unwrap(),
            slug("octo", "hello")
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RepositorySlug::parse("hello").is_err());
        assert!(RepositorySlug::parse("/hello").is_err());
        assert!(RepositorySlug::parse("a/b/c").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(slug("octo", "hello").to_string(), "octo/hello");
    }
}
