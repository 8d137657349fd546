//! Episode page parser.
//!
//! The episode page either carries the player iframe or is the
//! upstream's "not found" page, served with an ordinary status code.
//! Detection is therefore title-based, not status-based.

use scraper::{Html, Selector};

use crate::error::{GogoError, Result};

/// Fields extracted from an episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodePage {
    /// `ep_end` marker of the last pagination anchor, kept as the raw
    /// attribute string.
    pub last_episode: String,

    /// URL of the embedded player page.
    pub embed_url: String,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| GogoError::ParseError(format!("Invalid selector: {e:?}")))
}

/// Returns true if the page title signals the upstream "not found" page.
///
/// A page with no title at all counts as not found; the real episode
/// pages always have one.
pub fn page_is_not_found(html: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(title_selector) = Selector::parse("title") else {
        return true;
    };

    match document.select(&title_selector).next() {
        Some(title) => title
            .text()
            .collect::<String>()
            .to_lowercase()
            .contains("not found"),
        None => true,
    }
}

/// Parses an episode page into its last-episode marker and embed URL.
///
/// Callers must run [`page_is_not_found`] first; this function treats
/// missing fields as markup drift, not as a missing episode.
///
/// # Errors
/// `ParseError` if the pagination anchor or player iframe is absent.
pub fn parse_episode_page(html: &str) -> Result<EpisodePage> {
    let document = Html::parse_document(html);

    let last_episode = document
        .select(&selector("#episode_page li:last-child a")?)
        .next()
        .and_then(|el| el.value().attr("ep_end"))
        .ok_or_else(|| GogoError::ParseError("ep_end attribute not found".to_string()))?
        .to_string();

    let embed_url = document
        .select(&selector("div.play-video iframe")?)
        .next()
        .and_then(|el| el.value().attr("src"))
        .ok_or_else(|| GogoError::ParseError("player iframe not found".to_string()))?
        .to_string();

    Ok(EpisodePage {
        last_episode,
        embed_url,
    })
}
