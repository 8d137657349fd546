//! Search results parser for GogoAnime.
//!
//! Parses the search page and extracts anime cards, applying dub
//! filtering and the result limit.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{GogoError, Result};
use crate::types::SearchResult;
use crate::url::correct_img_url;

/// Parses search results HTML into a list of anime hits.
///
/// Malformed cards are skipped rather than failing the whole page, so
/// an empty vector is a valid outcome. The `max_results` cut is applied
/// after dub filtering; filtering must not change which of the
/// surviving entries make the cut.
///
/// # Arguments
/// * `html` - Raw HTML from the search page
/// * `base_url` - Provider base URL, for relative image correction
/// * `max_results` - Maximum number of results to return
/// * `filter_dub` - Drop entries whose name contains "(dub)"
pub fn parse_search_results(
    html: &str,
    base_url: &str,
    max_results: usize,
    filter_dub: bool,
) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let card_selector = Selector::parse("div.last_episodes ul.items li")
        .map_err(|e| GogoError::ParseError(format!("Invalid selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&card_selector) {
        let Some(anime) = parse_anime_card(&element, base_url) else {
            continue;
        };

        if filter_dub && anime.name.to_lowercase().contains("(dub)") {
            continue;
        }

        results.push(anime);
    }

    debug!(count = results.len(), "Parsed search results");
    results.truncate(max_results);
    Ok(results)
}

/// Parses a single search result card.
///
/// Returns `None` if the card is missing the anchor, image, or href.
fn parse_anime_card(element: &ElementRef, base_url: &str) -> Option<SearchResult> {
    let name = extract_name(element)?;

    let img_selector = Selector::parse("div a img").ok()?;
    let img = element.select(&img_selector).next()?.value().attr("src")?;
    let img_url = correct_img_url(base_url, img);

    let link_selector = Selector::parse("div a").ok()?;
    let href = element.select(&link_selector).next()?.value().attr("href")?;
    let id = href.rsplit('/').next()?.to_string();
    if id.is_empty() {
        return None;
    }

    Some(SearchResult { name, img_url, id })
}

/// Extracts the anime name from a card.
///
/// Prefers the anchor's `title` attribute; titles containing a literal
/// quote character break that attribute upstream, so fall back to the
/// paragraph text when it is absent or empty.
fn extract_name(element: &ElementRef) -> Option<String> {
    let anchor_selector = Selector::parse("p a").ok()?;
    if let Some(anchor) = element.select(&anchor_selector).next()
        && let Some(title) = anchor.value().attr("title")
        && !title.is_empty()
    {
        return Some(title.to_string());
    }

    let p_selector = Selector::parse("p").ok()?;
    let text: String = element
        .select(&p_selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    if text.is_empty() { None } else { Some(text) }
}
