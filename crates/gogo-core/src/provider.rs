//! Provider contract and registry.
//!
//! A provider is one external content source behind a base URL. The
//! trait is the capability set the rest of the system programs
//! against; concrete variants carry no shared state and are safe under
//! unbounded concurrent invocation.

use async_trait::async_trait;

use crate::error::Result;
use crate::gogo::GogoAnime;
use crate::types::{AnimeMetadata, ProviderConfig, SearchResult, StreamInfo};

/// Default number of search results when the caller has no preference.
pub const DEFAULT_SEARCH_RESULTS: usize = 5;

/// Capability set every content provider implements.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Search for anime by query.
    ///
    /// An empty result list is a valid, non-error outcome.
    ///
    /// # Errors
    /// `UpstreamUnavailable` if the fetch fails or times out.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter_dub: bool,
    ) -> Result<Vec<SearchResult>>;

    /// Fetch details for one anime.
    ///
    /// # Errors
    /// - `ParseError` if required fields are absent from the page.
    /// - `UpstreamUnavailable` on fetch failure.
    async fn get_metadata(&self, anime_id: &str) -> Result<AnimeMetadata>;

    /// Resolve the streaming link for one episode.
    ///
    /// # Errors
    /// - `AnimeNotFound` / `EpisodeNotFound` per the episode-1 probe.
    /// - `ParseError` if a protocol artifact is absent or malformed.
    /// - `CryptoError` if extracted key material is malformed.
    /// - `UpstreamUnavailable` on fetch failure or timeout.
    async fn resolve_stream(&self, anime_id: &str, episode_no: &str) -> Result<StreamInfo>;
}

/// Names of the registered provider implementations.
pub fn provider_names() -> &'static [&'static str] {
    &[GogoAnime::NAME]
}

/// Create a provider by registry name.
///
/// This is the startup-time factory: the boundary layer picks a name
/// from its configuration and passes the instance down. Returns
/// `Ok(None)` for a name that is not registered.
pub fn create_provider(
    name: &str,
    config: ProviderConfig,
) -> Result<Option<Box<dyn Provider>>> {
    match name {
        GogoAnime::NAME => Ok(Some(Box::new(GogoAnime::new(config)?))),
        _ => Ok(None),
    }
}
