//! Anime detail page parser.
//!
//! Extracts the fields shown on `/category/{anime_id}` pages. Unlike
//! search, every field here is required: a missing one means the
//! upstream markup changed and the caller gets a `ParseError`.

use scraper::{Html, Selector};

use crate::error::{GogoError, Result};
use crate::types::AnimeMetadata;
use crate::url::correct_img_url;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| GogoError::ParseError(format!("Invalid selector: {e:?}")))
}

/// Parses the detail page into [`AnimeMetadata`].
///
/// The episode count comes from the `ep_end` attribute of the last
/// pagination anchor; the episode list is implicitly `1..=episode_count`.
///
/// # Errors
/// `ParseError` if any required field is absent or `ep_end` is not an
/// integer.
pub fn parse_anime_metadata(html: &str, base_url: &str) -> Result<AnimeMetadata> {
    let document = Html::parse_document(html);

    let name = document
        .select(&selector("div.anime_info_body_bg h1")?)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GogoError::ParseError("anime title not found".to_string()))?;

    let img = document
        .select(&selector(".anime_info_body_bg img")?)
        .next()
        .and_then(|el| el.value().attr("src"))
        .ok_or_else(|| GogoError::ParseError("cover image not found".to_string()))?;
    let img_url = correct_img_url(base_url, img);

    let about = document
        .select(&selector(".anime_info_body_bg p:nth-of-type(3)")?)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| GogoError::ParseError("about paragraph not found".to_string()))?;

    let episode_count = document
        .select(&selector("#episode_page li:last-child a")?)
        .next()
        .and_then(|el| el.value().attr("ep_end"))
        .ok_or_else(|| GogoError::ParseError("ep_end attribute not found".to_string()))?
        .parse::<u32>()
        .map_err(|e| GogoError::ParseError(format!("ep_end is not an integer: {e}")))?;

    // Listed anime always have at least one episode; 0 means broken markup.
    if episode_count == 0 {
        return Err(GogoError::ParseError("ep_end must be at least 1".to_string()));
    }

    Ok(AnimeMetadata {
        name,
        img_url,
        about,
        episode_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://gogo.example";

    fn detail_page(ep_end: &str) -> String {
        format!(
            r#"<html><body>
            <div class="anime_info_body_bg">
                <img src="/cover/naruto.png">
                <h1>Naruto</h1>
                <p class="type">Type: TV</p>
                <p class="other">Plot Summary:</p>
                <p>A ninja story.</p>
            </div>
            <ul id="episode_page">
                <li><a ep_start="1" ep_end="100">1-100</a></li>
                <li><a ep_start="101" ep_end="{ep_end}">101-{ep_end}</a></li>
            </ul>
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_metadata() {
        let metadata = parse_anime_metadata(&detail_page("220"), BASE).unwrap();

        assert_eq!(metadata.name, "Naruto");
        assert_eq!(metadata.img_url, "https://gogo.example/cover/naruto.png");
        assert_eq!(metadata.about, "A ninja story.");
        assert_eq!(metadata.episode_count, 220);
    }

    #[test]
    fn test_episode_count_uses_last_pagination_anchor() {
        let metadata = parse_anime_metadata(&detail_page("500"), BASE).unwrap();
        assert_eq!(metadata.episode_count, 500);
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let html = r#"<html><body><div class="anime_info_body_bg"><img src="/x.png"></div></body></html>"#;
        let result = parse_anime_metadata(html, BASE);
        assert!(matches!(result, Err(GogoError::ParseError(_))));
    }

    #[test]
    fn test_missing_ep_end_is_parse_error() {
        let html = r#"<html><body>
            <div class="anime_info_body_bg">
                <img src="/x.png">
                <h1>Naruto</h1>
                <p>a</p><p>b</p><p>c</p>
            </div>
            <ul id="episode_page"><li><a ep_start="1">1-?</a></li></ul>
            </body></html>"#;
        let result = parse_anime_metadata(html, BASE);
        assert!(matches!(result, Err(GogoError::ParseError(_))));
    }

    #[test]
    fn test_zero_ep_end_is_parse_error() {
        let result = parse_anime_metadata(&detail_page("0"), BASE);
        assert!(matches!(result, Err(GogoError::ParseError(_))));
    }

    #[test]
    fn test_non_numeric_ep_end_is_parse_error() {
        let result = parse_anime_metadata(&detail_page("soon"), BASE);
        assert!(matches!(result, Err(GogoError::ParseError(_))));
    }
}
