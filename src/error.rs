//! Error types for release_sync operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release_sync operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release_sync operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Hosting API errors
    #[error("GitHub error: {0}")]
    Api(#[from] ApiError),

    /// Local asset errors
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

/// Errors returned by the hosting API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404)
    #[error("{resource} not found")]
    NotFound {
        /// What was looked up
        resource: String,
    },

    /// The API answered with a non-success status
    #[error("{operation} failed with status {status}: {message}")]
    Status {
        /// Operation that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Message reported by the API
        message: String,
    },

    /// The request never produced a response
    #[error("{operation} failed: {source}")]
    Transport {
        /// Operation that failed
        operation: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded
    #[error("Failed to decode response of {operation}: {reason}")]
    Decode {
        /// Operation whose response was malformed
        operation: String,
        /// Reason for the error
        reason: String,
    },

    /// An endpoint URL could not be built
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Reason for the error
        reason: String,
    },
}

impl ApiError {
    /// Whether this is the expected "nothing there" outcome of a lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Local asset file errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file could not be read
    #[error("Failed to read asset file {path}: {source}")]
    Read {
        /// Path of the asset file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The path has no usable file name
    #[error("Asset path has no valid file name: {path}")]
    InvalidName {
        /// Path of the asset file
        path: PathBuf,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Api(ApiError::Status { status: 401, .. }) => vec![
                "Check that GH_TOKEN or GITHUB_TOKEN holds a valid token".to_string(),
                "Pass a token explicitly with --token".to_string(),
            ],
            ReleaseError::Api(ApiError::Status { status: 403, .. }) => vec![
                "Ensure the token has 'contents: write' permission on the repository".to_string(),
                "Wait for the API rate limit to reset if it was exceeded".to_string(),
            ],
            ReleaseError::Api(ApiError::Status { status: 422, .. }) => vec![
                "Verify the commit or branch given with --commit exists".to_string(),
                "Check that the tag name is valid".to_string(),
            ],
            ReleaseError::Api(ApiError::Transport { .. }) => vec![
                "Check network connectivity to the GitHub API".to_string(),
                "Verify --api-url (GITHUB_API_URL) points at a reachable host".to_string(),
            ],
            ReleaseError::Asset(AssetError::Read { path, .. }) => vec![
                format!("Verify that {} exists and is readable", path.display()),
                "Separate multiple files with ';' in --files".to_string(),
            ],
            ReleaseError::Cli(CliError::MissingArgument { argument }) => vec![
                format!("Provide --{argument} or set the matching environment variable"),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        let err = ApiError::NotFound {
            resource: "release 'v1.0'".to_string(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_status_error_is_not_not_found() {
        let err = ApiError::Status {
            operation: "get release by tag".to_string(),
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unauthorized_suggests_token() {
        let err = ReleaseError::from(ApiError::Status {
            operation: "create release".to_string(),
            status: 401,
            message: "Bad credentials".to_string(),
        });
        let suggestions = err.recovery_suggestions();
        assert!(suggestions.iter().any(|s| s.contains("GITHUB_TOKEN")));
    }

    #[test]
    fn test_missing_file_suggestion_names_path() {
        let err = ReleaseError::from(AssetError::Read {
            path: PathBuf::from("dist/a.zip"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        let suggestions = err.recovery_suggestions();
        assert!(suggestions[0].contains("dist/a.zip"));
    }
}
