//! Error types for the GogoAnime scraper core.
//!
//! Provides a tagged error enum with human-readable messages and
//! serde-compatible serialization, so boundary layers can map error
//! kinds to responses without string matching.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all provider operations.
///
/// The two `NotFound` variants are deliberately distinct: resolving a
/// stream probes episode 1 to tell a missing anime apart from a missing
/// episode, and callers pattern-match on the kind.
#[derive(Error, Debug)]
pub enum GogoError {
    /// Neither the requested episode nor episode 1 resolves.
    #[error("Anime not found: {0}")]
    AnimeNotFound(String),

    /// The anime exists but the requested episode does not.
    #[error("Episode {episode} of {anime_id} not found")]
    EpisodeNotFound { anime_id: String, episode: String },

    /// Expected document field or protocol artifact absent/malformed.
    #[error("Failed to parse upstream document: {0}")]
    ParseError(String),

    /// Network failure or timeout contacting the provider.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// Key/IV material fails length or format preconditions.
    #[error("Bad key material: {0}")]
    CryptoError(String),
}

impl Serialize for GogoError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, GogoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_anime_not_found() {
        let error = GogoError::AnimeNotFound("naruto".to_string());
        assert_eq!(error.to_string(), "Anime not found: naruto");
    }

    #[test]
    fn test_error_display_episode_not_found() {
        let error = GogoError::EpisodeNotFound {
            anime_id: "naruto".to_string(),
            episode: "999".to_string(),
        };
        assert_eq!(error.to_string(), "Episode 999 of naruto not found");
    }

    #[test]
    fn test_error_display_parse_error() {
        let error = GogoError::ParseError("missing iframe".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to parse upstream document: missing iframe"
        );
    }

    #[test]
    fn test_error_display_crypto_error() {
        let error = GogoError::CryptoError("key must be 16 bytes".to_string());
        assert_eq!(error.to_string(), "Bad key material: key must be 16 bytes");
    }

    #[test]
    fn test_error_serialize() {
        let error = GogoError::AnimeNotFound("bleach".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Anime not found: bleach\"");
    }
}
