//! Core data types for the GogoAnime scraper.
//!
//! Every type here is created, consumed, and discarded within one
//! provider operation; nothing is cached across calls.

use serde::{Deserialize, Serialize};

/// Configuration for one provider instance.
///
/// Immutable after construction. The base URL is the mirror the
/// provider scrapes, e.g. `https://gogoanime.example`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider, without a trailing slash.
    pub base_url: String,
}

impl ProviderConfig {
    /// Create a config, trimming any trailing slash from the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

/// One hit from a provider search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Anime title.
    pub name: String,

    /// Absolute URL of the cover image.
    pub img_url: String,

    /// Provider-side anime ID (URL slug, e.g. "one-piece").
    pub id: String,
}

/// Details of one anime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeMetadata {
    /// Anime title.
    pub name: String,

    /// Absolute URL of the cover image.
    pub img_url: String,

    /// Synopsis text.
    pub about: String,

    /// Number of episodes; the episode list is the range `1..=episode_count`.
    pub episode_count: u32,
}

/// A resolved stream for one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Latest episode marker from the episode page. Carried through for
    /// downstream consumers; it plays no role in resolution itself.
    pub last_episode: String,

    /// Direct streaming URL for the requested episode.
    pub streaming_link: String,
}
