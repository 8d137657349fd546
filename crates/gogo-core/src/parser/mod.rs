//! HTML parsers for GogoAnime pages.
//!
//! One module per page type the provider consumes.

pub mod embed;
pub mod episode;
pub mod metadata;
pub mod search;

pub use embed::{EmbedPage, parse_embed_page};
pub use episode::{EpisodePage, page_is_not_found, parse_episode_page};
pub use metadata::parse_anime_metadata;
pub use search::parse_search_results;
