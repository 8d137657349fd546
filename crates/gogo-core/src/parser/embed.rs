//! Embed page parser.
//!
//! The embed page hides the handshake inputs in two places: key
//! material as numeric suffixes on `container-` / `videocontent-`
//! class tokens, and the encrypted request parameters in a
//! `<script data-name="episode">` tag's `data-value` attribute.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::crypto::KeyMaterial;
use crate::error::{GogoError, Result};

static KEY_TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn key_token_re() -> &'static Regex {
    KEY_TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?:container|videocontent)-(\d+)").expect("key token regex is valid")
    })
}

/// Handshake inputs extracted from the embed page.
#[derive(Debug, Clone)]
pub struct EmbedPage {
    /// Per-request key triple, in the page's textual order:
    /// primary key, IV, secondary key.
    pub keys: KeyMaterial,

    /// Base64 ciphertext from the episode script tag.
    pub encrypted_payload: String,
}

/// Parses the embed page into key material and the encrypted payload.
///
/// The three-token order (primary key, IV, secondary key) is an
/// observed property of the upstream markup, not something the page
/// declares. Exactly three tokens must match; any other count means
/// the markup changed.
///
/// # Errors
/// - `ParseError` if the token count is not three or the script tag is
///   missing.
/// - `CryptoError` if a token is not exactly 16 bytes.
pub fn parse_embed_page(html: &str) -> Result<EmbedPage> {
    let tokens: Vec<&str> = key_token_re()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let [primary, iv, secondary] = tokens.as_slice() else {
        return Err(GogoError::ParseError(format!(
            "expected 3 key tokens in embed page, found {}",
            tokens.len()
        )));
    };

    let keys = KeyMaterial::from_tokens(primary, iv, secondary)?;

    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script[data-name=episode]")
        .map_err(|e| GogoError::ParseError(format!("Invalid selector: {e:?}")))?;

    let encrypted_payload = document
        .select(&script_selector)
        .next()
        .and_then(|el| el.value().attr("data-value"))
        .ok_or_else(|| GogoError::ParseError("episode script tag not found".to_string()))?
        .to_string();

    Ok(EmbedPage {
        keys,
        encrypted_payload,
    })
}
