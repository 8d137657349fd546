//! HTTP client wrappers for GogoAnime providers.
//!
//! Two clients live here: [`GogoClient`] for plain page fetches and
//! [`EmbedSession`] for the embed handshake, which needs cookie
//! continuity between the embed GET and the AJAX POST. Neither retries;
//! retry policy belongs to the caller, and a timeout surfaces as
//! `UpstreamUnavailable`.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Stateless HTTP client for provider page fetches.
///
/// Safe to share across concurrent operations: it carries no cookies
/// and no mutable state.
pub struct GogoClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl GogoClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch a page and return its body.
    ///
    /// The status code is deliberately not inspected: the upstream
    /// serves its "not found" page with varying statuses, and the
    /// protocol detects it from the page title instead.
    ///
    /// # Errors
    /// `UpstreamUnavailable` on network failure or timeout.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }

    /// Open a fresh cookie-carrying session for one embed handshake.
    ///
    /// Each `resolve_stream` call gets its own session; cookie jars are
    /// never shared across calls.
    pub fn open_session(&self) -> Result<EmbedSession> {
        EmbedSession::new(&self.config)
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Cookie-carrying session scoped to a single stream resolution.
///
/// Cookies set by the embed page GET are replayed on the AJAX POST,
/// which the upstream requires.
pub struct EmbedSession {
    client: reqwest::Client,
}

impl EmbedSession {
    fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page within the session.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching embed page");
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }

    /// POST to the AJAX resolve endpoint with the headers the upstream
    /// checks, returning the response body.
    pub async fn post_ajax(&self, url: &str, referer: &str) -> Result<String> {
        debug!(url = %url, "Posting AJAX resolve request");
        let response = self
            .client
            .post(url)
            .header("x-requested-with", "XMLHttpRequest")
            .header("referer", referer)
            .send()
            .await?;
        Ok(response.text().await?)
    }
}
