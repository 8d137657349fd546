//! URL helpers for GogoAnime-family providers.
//!
//! Builders for the page URLs the provider fetches and small
//! extraction helpers for the embed handshake. All builders take the
//! provider base URL explicitly; nothing here holds state.

/// Builds the search URL for a query.
///
/// # Example
/// ```
/// use gogo_core::url::build_search_url;
/// let url = build_search_url("https://gogo.example", "one piece");
/// assert_eq!(url, "https://gogo.example/search.html?keyword=one%20piece");
/// ```
pub fn build_search_url(base: &str, query: &str) -> String {
    format!("{}/search.html?keyword={}", base, urlencoding::encode(query))
}

/// Builds the anime detail (category) page URL.
///
/// # Example
/// ```
/// use gogo_core::url::build_category_url;
/// let url = build_category_url("https://gogo.example", "one-piece");
/// assert_eq!(url, "https://gogo.example/category/one-piece");
/// ```
pub fn build_category_url(base: &str, anime_id: &str) -> String {
    format!("{}/category/{}", base, anime_id)
}

/// Builds the episode page URL.
///
/// # Example
/// ```
/// use gogo_core::url::build_episode_url;
/// let url = build_episode_url("https://gogo.example", "one-piece", "42");
/// assert_eq!(url, "https://gogo.example/one-piece-episode-42");
/// ```
pub fn build_episode_url(base: &str, anime_id: &str, episode_no: &str) -> String {
    format!("{}/{}-episode-{}", base, anime_id, episode_no)
}

/// Builds the AJAX resolve URL from the embed origin, the encrypted
/// request parameters, and the raw embed ID (sent as `alias`).
pub fn build_ajax_url(origin: &str, params: &[(String, String)], embed_id: &str) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}/encrypt-ajax.php?{}&alias={}", origin, query, embed_id)
}

/// Extracts the origin (`scheme://host`) from an embed URL.
///
/// Returns `None` when the URL has no host part.
pub fn embed_origin(embed_url: &str) -> Option<String> {
    let parts: Vec<&str> = embed_url.splitn(4, '/').collect();
    if parts.len() >= 3 && parts[0].ends_with(':') && parts[1].is_empty() && !parts[2].is_empty() {
        return Some(format!("{}//{}", parts[0], parts[2]));
    }
    None
}

/// Extracts the raw `id` query parameter from an embed URL.
pub fn extract_embed_id(embed_url: &str) -> Option<String> {
    let (_, after) = embed_url.split_once("id=")?;
    let id = after.split('&').next().unwrap_or(after);
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}

/// Parses a form-urlencoded query string into key/value pairs.
///
/// Uses form semantics: `+` decodes to a space before percent
/// decoding. Segments without `=` are skipped, matching lenient
/// query-string parsing on the upstream side.
pub fn parse_query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            if key.is_empty() {
                return None;
            }
            Some((form_decode(key)?, form_decode(value)?))
        })
        .collect()
}

fn form_decode(component: &str) -> Option<String> {
    let spaced = component.replace('+', " ");
    Some(urlencoding::decode(&spaced).ok()?.into_owned())
}

/// Corrects a scraped image `src` into an absolute URL.
///
/// Some cards carry relative paths; those get the provider base
/// prefixed. Absolute URLs pass through unchanged.
///
/// # Example
/// ```
/// use gogo_core::url::correct_img_url;
/// let url = correct_img_url("https://p.example", "/img/x.png");
/// assert_eq!(url, "https://p.example/img/x.png");
/// ```
pub fn correct_img_url(base: &str, src: &str) -> String {
    if src.starts_with('/') {
        format!("{}{}", base, src)
    } else {
        src.to_string()
    }
}
