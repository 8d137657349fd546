//! GogoAnime provider.
//!
//! Implements the [`Provider`] contract for the GogoAnime site family.
//! `search` and `get_metadata` are single fetch-and-parse operations;
//! `resolve_stream` drives the encrypted embed handshake, which is the
//! interesting part and lives in [`Provider::resolve_stream`].

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::client::{ClientConfig, GogoClient};
use crate::crypto;
use crate::error::{GogoError, Result};
use crate::parser;
use crate::provider::Provider;
use crate::types::{AnimeMetadata, ProviderConfig, SearchResult, StreamInfo};
use crate::url::{
    build_ajax_url, build_category_url, build_episode_url, build_search_url, embed_origin,
    extract_embed_id, parse_query_pairs,
};

/// AJAX resolve response envelope; `data` is ciphertext.
#[derive(Deserialize)]
struct AjaxResponse {
    data: String,
}

/// Decrypted AJAX payload: the first source's `file` is the stream.
#[derive(Deserialize)]
struct SourceList {
    source: Vec<SourceEntry>,
}

#[derive(Deserialize)]
struct SourceEntry {
    file: String,
}

/// Scraper for the GogoAnime site family.
///
/// Holds only immutable configuration and a stateless HTTP client, so
/// one instance serves any number of concurrent calls.
pub struct GogoAnime {
    config: ProviderConfig,
    client: GogoClient,
}

impl GogoAnime {
    /// Registry name of this provider.
    pub const NAME: &'static str = "gogoanime";

    /// Create a provider for the given base URL.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = GogoClient::new()?;
        Ok(Self { config, client })
    }

    /// Create a provider with a custom HTTP client configuration.
    pub fn with_client_config(config: ProviderConfig, client_config: ClientConfig) -> Result<Self> {
        let client = GogoClient::with_config(client_config)?;
        Ok(Self { config, client })
    }

    fn base(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl Provider for GogoAnime {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter_dub: bool,
    ) -> Result<Vec<SearchResult>> {
        let url = build_search_url(self.base(), query);
        let html = self.client.fetch(&url).await?;
        parser::parse_search_results(&html, self.base(), max_results, filter_dub)
    }

    async fn get_metadata(&self, anime_id: &str) -> Result<AnimeMetadata> {
        let url = build_category_url(self.base(), anime_id);
        let html = self.client.fetch(&url).await?;
        parser::parse_anime_metadata(&html, self.base())
    }

    async fn resolve_stream(&self, anime_id: &str, episode_no: &str) -> Result<StreamInfo> {
        // Episode page. The "not found" page comes back as a regular
        // document, so existence is decided by the title.
        let episode_url = build_episode_url(self.base(), anime_id, episode_no);
        let html = self.client.fetch(&episode_url).await?;

        if parser::page_is_not_found(&html) {
            // Probe episode 1 to tell a missing anime from a missing
            // episode; a single not-found signal is ambiguous.
            let probe_url = build_episode_url(self.base(), anime_id, "1");
            let probe = self.client.fetch(&probe_url).await?;
            if parser::page_is_not_found(&probe) {
                return Err(GogoError::AnimeNotFound(anime_id.to_string()));
            }
            return Err(GogoError::EpisodeNotFound {
                anime_id: anime_id.to_string(),
                episode: episode_no.to_string(),
            });
        }

        let episode = parser::parse_episode_page(&html)?;
        debug!(embed_url = %episode.embed_url, last_episode = %episode.last_episode, "Found player embed");

        let origin = embed_origin(&episode.embed_url)
            .ok_or_else(|| GogoError::ParseError("embed URL has no origin".to_string()))?;
        let embed_id = extract_embed_id(&episode.embed_url)
            .ok_or_else(|| GogoError::ParseError("embed URL has no id parameter".to_string()))?;

        // Embed page. Cookies from this GET must ride on the POST, so
        // the handshake gets its own session.
        let session = self.client.open_session()?;
        let embed_html = session.fetch(&episode.embed_url).await?;
        let embed = parser::parse_embed_page(&embed_html)?;
        let keys = &embed.keys;

        // The encrypted script payload decrypts to the extra POST
        // parameters the endpoint expects.
        let recovered =
            crypto::decrypt(&embed.encrypted_payload, &keys.primary_key, &keys.iv)?;
        let recovered = String::from_utf8(recovered).map_err(|_| {
            GogoError::ParseError("decrypted request parameters are not UTF-8".to_string())
        })?;

        // Outbound `id` is the one parameter sent encrypted. Recovered
        // pairs override on key collision, `id` keeps first position.
        let encrypted_id = crypto::encrypt(embed_id.as_bytes(), &keys.primary_key, &keys.iv)?;
        let mut params: Vec<(String, String)> = vec![("id".to_string(), encrypted_id)];
        for (key, value) in parse_query_pairs(&recovered) {
            if let Some(existing) = params.iter_mut().find(|(k, _)| *k == key) {
                existing.1 = value;
            } else {
                params.push((key, value));
            }
        }

        let ajax_url = build_ajax_url(&origin, &params, &embed_id);
        let body = session.post_ajax(&ajax_url, &episode.embed_url).await?;

        let ajax: AjaxResponse = serde_json::from_str(&body)
            .map_err(|e| GogoError::ParseError(format!("bad AJAX response: {e}")))?;

        let source_json = crypto::decrypt(&ajax.data, &keys.secondary_key, &keys.iv)?;
        let sources: SourceList = serde_json::from_slice(&source_json)
            .map_err(|e| GogoError::ParseError(format!("bad source payload: {e}")))?;

        let streaming_link = sources
            .source
            .into_iter()
            .next()
            .map(|entry| entry.file)
            .ok_or_else(|| GogoError::ParseError("source list is empty".to_string()))?;

        debug!(link = %streaming_link, "Resolved stream");
        Ok(StreamInfo {
            last_episode: episode.last_episode,
            streaming_link,
        })
    }
}
