//! HTTP retrieval with explicit redirect following.
//!
//! Automatic redirects are disabled on the underlying client so every hop
//! goes through [`HttpRetriever::retrieve`], which caps the chain at
//! [`MAX_REDIRECTS`]. Credentials are only sent through
//! [`HttpRetriever::retrieve_authorized`], and only while a hop stays on the
//! token's origin (scheme, host and port).

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, LOCATION};
use reqwest::{StatusCode, Url};

use crate::error::{Result, ScaffoldError};

/// Identifying `User-Agent` sent with every request.
pub const USER_AGENT: &str = "chatbot-cli";

/// Maximum number of redirect hops followed for one request.
pub const MAX_REDIRECTS: usize = 10;

/// Settings for an [`HttpRetriever`].
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Per-request timeout (applies to each hop).
    pub timeout: Duration,
    /// Bearer token for requests made through `retrieve_authorized`.
    pub token: Option<String>,
    /// Redirect hop limit.
    pub max_redirects: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            token: None,
            max_redirects: MAX_REDIRECTS,
        }
    }
}

impl RetrieverConfig {
    /// Default settings with the token taken from `GITHUB_TOKEN`.
    pub fn from_env() -> Self {
        Self {
            token: std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            ..Self::default()
        }
    }
}

/// Performs GET requests and returns the body text.
pub struct HttpRetriever {
    client: Client,
    config: RetrieverConfig,
}

impl HttpRetriever {
    /// Create a retriever with the default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_config(RetrieverConfig::default())
    }

    /// Create a retriever with custom settings.
    pub fn with_config(config: RetrieverConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ScaffoldError::ClientBuild)?;

        Ok(Self { client, config })
    }

    /// Fetch `url`, following redirects, and return the response body.
    ///
    /// No credentials are sent. No retries are performed: the first failure
    /// is returned.
    pub fn retrieve(&self, url: &str) -> Result<String> {
        self.get(url, None)
    }

    /// Like [`retrieve`](Self::retrieve), but sends the configured token on
    /// every hop whose origin equals `token_origin`'s.
    pub fn retrieve_authorized(&self, url: &str, token_origin: &Url) -> Result<String> {
        self.get(url, Some(token_origin))
    }

    fn get(&self, url: &str, token_origin: Option<&Url>) -> Result<String> {
        let mut current = parse_url(url)?;

        for hop in 0..=self.config.max_redirects {
            tracing::debug!("GET {} (hop {})", current, hop);

            let mut request = self.client.get(current.clone());
            if let (Some(token), Some(origin)) = (&self.config.token, token_origin) {
                if current.origin() == origin.origin() {
                    request = request.header(AUTHORIZATION, format!("Bearer {}", token));
                }
            }

            let response = request.send().map_err(|source| ScaffoldError::Network {
                url: current.to_string(),
                source,
            })?;

            let status = response.status();

            if is_followed_redirect(status) {
                if let Some(location) = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                {
                    let next = current.join(location).map_err(|e| ScaffoldError::Http {
                        url: current.to_string(),
                        status: status.as_u16(),
                        status_text: format!("invalid Location header '{}': {}", location, e),
                    })?;
                    tracing::debug!("{} redirected to {}", current, next);
                    current = next;
                    continue;
                }
            }

            if !status.is_success() {
                return Err(ScaffoldError::Http {
                    url: current.to_string(),
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            return response.text().map_err(|source| ScaffoldError::Network {
                url: current.to_string(),
                source,
            });
        }

        Err(ScaffoldError::TooManyRedirects {
            url: url.to_string(),
            limit: self.config.max_redirects,
        })
    }
}

fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| ScaffoldError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}
