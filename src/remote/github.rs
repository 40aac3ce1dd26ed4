//! Repository content fetching via the contents API.
//!
//! A path is first resolved through the directory-listing endpoint. A
//! single file entry yields one [`RemoteFile`]; a directory is walked
//! depth-first in listing order, producing one file per descendant with
//! its path relative to the requested directory.

use reqwest::Url;
use serde::Deserialize;

use super::http::HttpRetriever;
use crate::error::{Result, ScaffoldError};

/// Default contents API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default raw content base.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Base URLs for the listing and raw-content endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Listing API base, e.g. `https://api.github.com`.
    pub api_base: String,
    /// Raw content base, e.g. `https://raw.githubusercontent.com`.
    pub raw_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Endpoints with `CHATBOT_CLI_API_URL` / `CHATBOT_CLI_RAW_URL` overrides.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: std::env::var("CHATBOT_CLI_API_URL").unwrap_or(defaults.api_base),
            raw_base: std::env::var("CHATBOT_CLI_RAW_URL").unwrap_or(defaults.raw_base),
        }
    }

    /// Both endpoints served from one base URL (mirrors, tests).
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            api_base: base.clone(),
            raw_base: base,
        }
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path}?ref={branch}`
    pub fn listing_url(&self, coord: &RepoCoordinate, path: &str) -> Result<Url> {
        let mut url = base_url(&self.api_base)?;
        extend_segments(&mut url, &["repos", &coord.owner, &coord.repo, "contents"]);
        extend_segments(&mut url, &split_path(path));
        url.query_pairs_mut().append_pair("ref", &coord.branch);
        Ok(url)
    }

    /// Origin that may receive the API token.
    pub fn api_origin(&self) -> Result<Url> {
        base_url(&self.api_base)
    }

    /// `{raw}/{owner}/{repo}/{branch}/{path}`
    pub fn raw_url(&self, coord: &RepoCoordinate, path: &str) -> Result<Url> {
        let mut url = base_url(&self.raw_base)?;
        extend_segments(&mut url, &[&coord.owner, &coord.repo, &coord.branch]);
        extend_segments(&mut url, &split_path(path));
        Ok(url)
    }
}

fn base_url(base: &str) -> Result<Url> {
    let url = Url::parse(base).map_err(|e| ScaffoldError::Parse {
        url: base.to_string(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ScaffoldError::Parse {
            url: base.to_string(),
            message: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

fn extend_segments(url: &mut Url, segments: &[&str]) {
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Where a component lives remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinate {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepoCoordinate {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

/// A fetched file: path relative to the requested location plus raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    pub content: String,
}

/// Kind of a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules and anything newer.
    #[serde(other)]
    Other,
}

/// One entry of a contents listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// A listing is one object for a file and an array for a directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing {
    Directory(Vec<ContentEntry>),
    Single(ContentEntry),
}

impl Listing {
    /// Parse a listing payload.
    pub fn parse(url: &str, body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| ScaffoldError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Resolves repository paths to file contents.
pub struct ContentFetcher {
    retriever: HttpRetriever,
    endpoints: Endpoints,
}

impl ContentFetcher {
    /// Create a fetcher over the given retriever and endpoints.
    pub fn new(retriever: HttpRetriever, endpoints: Endpoints) -> Self {
        Self {
            retriever,
            endpoints,
        }
    }

    /// Fetcher configured from the environment (token, base URL overrides).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            HttpRetriever::with_config(super::http::RetrieverConfig::from_env())?,
            Endpoints::from_env(),
        ))
    }

    /// Fetch every file under `path` (or the single file at `path`).
    pub fn fetch_directory(&self, coord: &RepoCoordinate, path: &str) -> Result<Vec<RemoteFile>> {
        let mut files = Vec::new();
        self.walk(coord, path, "", &mut files)
            .map_err(|source| ScaffoldError::Fetch {
                owner: coord.owner.clone(),
                repo: coord.repo.clone(),
                path: path.to_string(),
                source: Box::new(source),
            })?;
        Ok(files)
    }

    /// Fetch one file directly from the raw content endpoint.
    pub fn fetch_raw_file(&self, coord: &RepoCoordinate, file_path: &str) -> Result<String> {
        self.raw(coord, file_path)
            .map_err(|source| ScaffoldError::Fetch {
                owner: coord.owner.clone(),
                repo: coord.repo.clone(),
                path: file_path.to_string(),
                source: Box::new(source),
            })
    }

    fn raw(&self, coord: &RepoCoordinate, file_path: &str) -> Result<String> {
        let url = self.endpoints.raw_url(coord, file_path)?;
        self.retriever.retrieve(url.as_str())
    }

    fn walk(
        &self,
        coord: &RepoCoordinate,
        path: &str,
        prefix: &str,
        files: &mut Vec<RemoteFile>,
    ) -> Result<()> {
        let url = self.endpoints.listing_url(coord, path)?;
        let body = self
            .retriever
            .retrieve_authorized(url.as_str(), &self.endpoints.api_origin()?)?;

        match Listing::parse(url.as_str(), &body)? {
            Listing::Single(entry) => {
                if entry.kind == EntryKind::File {
                    let content = self.file_content(coord, &entry)?;
                    files.push(RemoteFile {
                        path: format!("{}{}", prefix, entry.name),
                        content,
                    });
                } else {
                    tracing::warn!(
                        "Skipping {} ({:?}): not a regular file",
                        entry.path,
                        entry.kind
                    );
                }
            }
            Listing::Directory(entries) => {
                tracing::debug!("{} lists {} entries", path, entries.len());
                for entry in entries {
                    match entry.kind {
                        EntryKind::File => {
                            let content = self.file_content(coord, &entry)?;
                            files.push(RemoteFile {
                                path: format!("{}{}", prefix, entry.name),
                                content,
                            });
                        }
                        EntryKind::Dir => {
                            let nested = format!("{}{}/", prefix, entry.name);
                            self.walk(coord, &entry.path, &nested, files)?;
                        }
                        EntryKind::Other => {
                            tracing::warn!("Skipping {}: unsupported entry type", entry.path);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn file_content(&self, coord: &RepoCoordinate, entry: &ContentEntry) -> Result<String> {
        match &entry.download_url {
            Some(download_url) => self.retriever.retrieve(download_url),
            None => self.raw(coord, &entry.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::http::RetrieverConfig;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn fetcher(server: &MockServer) -> ContentFetcher {
        let retriever = HttpRetriever::with_config(RetrieverConfig {
            timeout: Duration::from_secs(5),
            ..RetrieverConfig::default()
        })
        .unwrap();
        ContentFetcher::new(retriever, Endpoints::single(server.base_url()))
    }

    fn coord() -> RepoCoordinate {
        RepoCoordinate::new("acme", "react-chatbot-openai", "main")
    }

    #[test]
    fn listing_url_has_ref_query() {
        let endpoints = Endpoints::default();
        let url = endpoints
            .listing_url(&coord(), "components/Chatbot.tsx")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/react-chatbot-openai/contents/components/Chatbot.tsx?ref=main"
        );
    }

    #[test]
    fn raw_url_layout() {
        let endpoints = Endpoints::default();
        let url = endpoints.raw_url(&coord(), "hooks/useChat.ts").unwrap();
        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/acme/react-chatbot-openai/main/hooks/useChat.ts"
        );
    }

    #[test]
    fn listing_url_encodes_segments() {
        let endpoints = Endpoints::default();
        let url = endpoints.listing_url(&coord(), "my dir/a#b.ts").unwrap();
        assert!(url.as_str().contains("/contents/my%20dir/a%23b.ts?ref=main"));
    }

    #[test]
    fn parses_single_and_directory_listings() {
        let single = r#"{"name":"a.ts","path":"x/a.ts","type":"file","download_url":"http://h/a"}"#;
        assert!(matches!(
            Listing::parse("u", single).unwrap(),
            Listing::Single(_)
        ));

        let dir = r#"[{"name":"b","path":"x/b","type":"dir","download_url":null},
                      {"name":"l","path":"x/l","type":"symlink"}]"#;
        match Listing::parse("u", dir).unwrap() {
            Listing::Directory(entries) => {
                assert_eq!(entries[0].kind, EntryKind::Dir);
                assert_eq!(entries[1].kind, EntryKind::Other);
            }
            other => panic!("expected directory, got {:?}", other),
        }
    }

    #[test]
    fn malformed_listing_is_parse_error() {
        let err = Listing::parse("u", "<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, ScaffoldError::Parse { .. }));
    }

    #[test]
    fn single_file_listing_yields_one_file() {
        let server = MockServer::start();
        let download = server.url("/download/Chatbot.tsx");

        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/react-chatbot-openai/contents/components/Chatbot.tsx")
                .query_param("ref", "main");
            then.status(200).json_body(serde_json::json!({
                "name": "Chatbot.tsx",
                "path": "components/Chatbot.tsx",
                "type": "file",
                "download_url": download,
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/download/Chatbot.tsx");
            then.status(200).body("export const Chatbot = () => null;");
        });

        let files = fetcher(&server)
            .fetch_directory(&coord(), "components/Chatbot.tsx")
            .unwrap();

        assert_eq!(
            files,
            vec![RemoteFile {
                path: "Chatbot.tsx".to_string(),
                content: "export const Chatbot = () => null;".to_string(),
            }]
        );
    }

    #[test]
    fn directory_listing_recurses_with_prefixes() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/react-chatbot-openai/contents/components");
            then.status(200).json_body(serde_json::json!([
                {
                    "name": "Chatbot.tsx",
                    "path": "components/Chatbot.tsx",
                    "type": "file",
                    "download_url": server.url("/dl/Chatbot.tsx"),
                },
                {
                    "name": "parts",
                    "path": "components/parts",
                    "type": "dir",
                    "download_url": null,
                },
                {
                    "name": "vendor",
                    "path": "components/vendor",
                    "type": "submodule",
                    "download_url": null,
                },
            ]));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/react-chatbot-openai/contents/components/parts");
            then.status(200).json_body(serde_json::json!([
                {
                    "name": "Message.tsx",
                    "path": "components/parts/Message.tsx",
                    "type": "file",
                    "download_url": null,
                },
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/dl/Chatbot.tsx");
            then.status(200).body("chatbot");
        });
        let raw = server.mock(|when, then| {
            when.method(GET)
                .path("/acme/react-chatbot-openai/main/components/parts/Message.tsx");
            then.status(200).body("message");
        });

        let files = fetcher(&server)
            .fetch_directory(&coord(), "components")
            .unwrap();

        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["Chatbot.tsx", "parts/Message.tsx"]);
        assert_eq!(files[1].content, "message");
        raw.assert();
    }

    #[test]
    fn fetch_error_carries_coordinate() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/react-chatbot-openai/contents/missing");
            then.status(404);
        });

        let err = fetcher(&server)
            .fetch_directory(&coord(), "missing")
            .unwrap_err();

        match err {
            ScaffoldError::Fetch {
                owner,
                repo,
                path,
                source,
            } => {
                assert_eq!(owner, "acme");
                assert_eq!(repo, "react-chatbot-openai");
                assert_eq!(path, "missing");
                assert!(matches!(*source, ScaffoldError::Http { status: 404, .. }));
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }

    #[test]
    fn fetch_raw_file_skips_listing() {
        let server = MockServer::start();
        let raw = server.mock(|when, then| {
            when.method(GET)
                .path("/acme/react-chatbot-openai/main/README.md");
            then.status(200).body("# readme");
        });

        let content = fetcher(&server)
            .fetch_raw_file(&coord(), "README.md")
            .unwrap();

        assert_eq!(content, "# readme");
        raw.assert();
    }

    #[test]
    fn token_only_accompanies_listing_requests() {
        let api = MockServer::start();
        let raw = MockServer::start();
        let download = raw.url("/download/Chatbot.tsx");

        let listing = api.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/react-chatbot-openai/contents/components/Chatbot.tsx")
                .header("Authorization", "Bearer secret-token");
            then.status(200).json_body(serde_json::json!({
                "name": "Chatbot.tsx",
                "path": "components/Chatbot.tsx",
                "type": "file",
                "download_url": download,
            }));
        });
        let leaked = raw.mock(|when, then| {
            when.method(GET)
                .path("/download/Chatbot.tsx")
                .header_exists("Authorization");
            then.status(200).body("leaked");
        });
        let anonymous = raw.mock(|when, then| {
            when.method(GET)
                .path("/download/Chatbot.tsx")
                .header_missing("Authorization");
            then.status(200).body("export const Chatbot = () => null;");
        });

        let retriever = HttpRetriever::with_config(RetrieverConfig {
            timeout: Duration::from_secs(5),
            token: Some("secret-token".to_string()),
            ..RetrieverConfig::default()
        })
        .unwrap();
        let fetcher = ContentFetcher::new(
            retriever,
            Endpoints {
                api_base: api.base_url(),
                raw_base: raw.base_url(),
            },
        );

        let files = fetcher
            .fetch_directory(&coord(), "components/Chatbot.tsx")
            .unwrap();

        assert_eq!(files[0].content, "export const Chatbot = () => null;");
        listing.assert();
        leaked.assert_calls(0);
        anonymous.assert();
    }
}
