//! GogoAnime Scraper Core Library
//!
//! Async provider adapter for GogoAnime-family sites: search, anime
//! metadata, and stream resolution via the site's encrypted AJAX
//! handshake.
//!
//! # Overview
//!
//! The crate is organized around a small capability trait,
//! [`Provider`], with one concrete implementation, [`GogoAnime`]:
//! - `search` and `get_metadata` are single fetch-and-parse calls
//! - `resolve_stream` reconstructs a playable video URL by chaining
//!   the episode page, the player embed page, and the encrypted
//!   `encrypt-ajax.php` exchange
//!
//! Everything is stateless across calls: key material rotates per page
//! load and is extracted fresh on every resolution, and the cookie
//! session for the handshake never outlives one call. The serving
//! layer on top needs no synchronization.
//!
//! # Example
//!
//! ```no_run
//! use gogo_core::{GogoAnime, Provider, ProviderConfig, Result, DEFAULT_SEARCH_RESULTS};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let provider = GogoAnime::new(ProviderConfig::new("https://gogoanime.example"))?;
//!
//!     let hits = provider.search("one piece", DEFAULT_SEARCH_RESULTS, true).await?;
//!     for anime in &hits {
//!         println!("{} ({})", anime.name, anime.id);
//!     }
//!
//!     if let Some(anime) = hits.first() {
//!         let stream = provider.resolve_stream(&anime.id, "1").await?;
//!         println!("Stream: {}", stream.streaming_link);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! All operations fail with a tagged [`GogoError`]; the two `NotFound`
//! kinds are distinct because stream resolution probes episode 1 to
//! disambiguate a missing anime from a missing episode. No failure is
//! retried internally.

mod client;
pub mod crypto;
mod error;
mod gogo;
pub mod parser;
mod provider;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, EmbedSession, GogoClient};

// Re-export error types
pub use error::{GogoError, Result};

// Re-export the provider contract and registry
pub use provider::{DEFAULT_SEARCH_RESULTS, Provider, create_provider, provider_names};

// Re-export the concrete provider
pub use gogo::GogoAnime;

// Re-export data types
pub use types::{AnimeMetadata, ProviderConfig, SearchResult, StreamInfo};

// Re-export crypto primitives and key material
pub use crypto::{KeyMaterial, decrypt, encrypt};
