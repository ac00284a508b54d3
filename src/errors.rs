//! Defines application-specific error types.
//!
//! This module provides the top-level `Error` enum along with the more specific
//! `ConfigError` and `FetchError` types. Failures that the traversal tolerates
//! (a failed listing, a failed clone) are carried as values in the run report
//! rather than as `Error`s; only conditions that end a run surface here.

use thiserror::Error;

/// A specialized `Result` type for `groupmirror` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A specialized `Result` type for a single GitLab listing.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors that end a `groupmirror` run.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration was invalid or incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The top-level group listing could not be fetched, so the target group
    /// cannot be searched for.
    #[error("Failed to list groups: {0}")]
    GroupListing(#[source] FetchError),

    /// The credential can see no groups at all.
    #[error("No groups are visible to the configured token.")]
    NoGroups,

    /// No visible group has the configured target name.
    #[error("Group '{name}' does not exist or is not visible to the configured token.")]
    GroupNotFound {
        /// The configured target group name.
        name: String,
    },

    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,

    /// An I/O error while writing the report or preparing the run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other error, typically from setting up the HTTP client or a worker pool.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors raised while building or validating a `Config`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option was not provided.
    #[error("Missing required option: {0}")]
    Missing(String),

    /// An option had a value that cannot be used.
    #[error("Invalid value for option '{option}': {reason}")]
    InvalidValue {
        /// The option name, as spelled on the command line.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Why a single GitLab listing failed.
///
/// A listing either succeeds with a (possibly empty) list or fails with one of
/// these causes, so callers can tell "no children" apart from "request failed".
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("request to '{url}' failed: {source}")]
    Transport {
        /// The requested URL, without credentials.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request to '{url}' returned HTTP {status}")]
    Status {
        /// The requested URL, without credentials.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body was not the expected JSON array.
    #[error("response from '{url}' could not be decoded: {source}")]
    Decode {
        /// The requested URL, without credentials.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The request URL could not be built from the configured base URL.
    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}
