//! Error types for chatbot-cli operations.
//!
//! This module defines [`ScaffoldError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Transport and status failures are raised by the retriever
//!   ([`ScaffoldError::Network`], [`ScaffoldError::Http`],
//!   [`ScaffoldError::TooManyRedirects`])
//! - The fetcher wraps them with the coordinate that produced them
//!   ([`ScaffoldError::Fetch`])
//! - The assembler wraps fetch failures once more with the owner/repo it was
//!   resolving ([`ScaffoldError::TemplateFetch`]) and never returns a partial
//!   template
//! - Use `anyhow::Error` (via `ScaffoldError::Other`) only for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for chatbot-cli operations.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Component identifier is not in the registry.
    #[error("Component \"{id}\" not found in registry")]
    UnknownComponent { id: String },

    /// Transport-level failure (DNS, connection reset, timeout).
    #[error("Network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status}: {status_text} ({url})")]
    Http {
        url: String,
        status: u16,
        status_text: String,
    },

    /// Redirect chain exceeded the hop limit.
    #[error("Too many redirects (limit {limit}) starting at {url}")]
    TooManyRedirects { url: String, limit: usize },

    /// Directory listing payload could not be understood.
    #[error("Failed to parse listing from {url}: {message}")]
    Parse { url: String, message: String },

    /// A remote path could not be fetched.
    #[error("Failed to fetch {path} from {owner}/{repo}: {source}")]
    Fetch {
        owner: String,
        repo: String,
        path: String,
        #[source]
        source: Box<ScaffoldError>,
    },

    /// Template assembly aborted because one of its sources failed.
    #[error("Failed to fetch component from {owner}/{repo}: {source}")]
    TemplateFetch {
        owner: String,
        repo: String,
        #[source]
        source: Box<ScaffoldError>,
    },

    /// Strict downgrade refused a construct it cannot rewrite safely.
    #[error("Cannot safely strip types from {path} (line {line}): {construct}")]
    AmbiguousSyntax {
        path: String,
        line: usize,
        construct: String,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or registry document.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Registry document is well-formed but inconsistent.
    #[error("Invalid registry: {message}")]
    InvalidRegistry { message: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScaffoldError {
    /// Whether this error came from (or wraps) a failed remote fetch.
    pub fn is_fetch_failure(&self) -> bool {
        match self {
            Self::Network { .. }
            | Self::Http { .. }
            | Self::TooManyRedirects { .. }
            | Self::Parse { .. } => true,
            Self::Fetch { .. } | Self::TemplateFetch { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for chatbot-cli operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
