//! Remote component source acquisition.
//!
//! - [`http`] - GET with bounded redirect following
//! - [`github`] - contents-API listing resolution and raw file fetching

pub mod github;
pub mod http;

pub use github::{ContentEntry, ContentFetcher, Endpoints, EntryKind, Listing, RemoteFile, RepoCoordinate};
pub use http::{HttpRetriever, RetrieverConfig, MAX_REDIRECTS, USER_AGENT};
