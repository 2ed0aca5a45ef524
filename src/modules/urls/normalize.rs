//! Canonicalization of shared links: tracking parameters out, fragment and
//! userinfo dropped, surviving parameters sorted by name, no trailing slash
//! except on the root path.

use serde::Serialize;
use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::{form_urlencoded, Url};

/// Query keys stripped during normalization. Matching is case-sensitive.
pub const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "source",
    "campaign_id",
];

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("URL is required")]
    Empty,

    #[error("invalid URL format: {0}")]
    Malformed(#[from] url::ParseError),
}

/// Components of a normalized URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedUrl {
    pub original_url: String,
    pub cleaned_url: String,
    /// Host, with the port when it is not the scheme default
    pub domain: String,
    /// Path as parsed, before the trailing slash is trimmed
    pub path: String,
    /// Filtered query, form-encoded, without the leading `?`
    pub query: String,
}

/// Normalize `raw`. Applying this to its own `cleaned_url` is a no-op.
pub fn normalize(raw: &str) -> Result<NormalizedUrl, UrlError> {
    if raw.trim().is_empty() {
        return Err(UrlError::Empty);
    }
    let parsed = Url::parse(raw)?;

    let query = filtered_query(&parsed);

    let mut cleaned = parsed.clone();
    cleaned.set_fragment(None);
    if cleaned.has_host() {
        // Both setters only fail when there is no host.
        let _ = cleaned.set_username("");
        let _ = cleaned.set_password(None);
    }
    cleaned.set_query(if query.is_empty() { None } else { Some(&query) });
    cleaned.set_path(trim_trailing_slash(parsed.path()));

    Ok(NormalizedUrl {
        original_url: raw.to_string(),
        cleaned_url: cleaned.to_string(),
        domain: domain(&parsed),
        path: parsed.path().to_string(),
        query,
    })
}

/// Drop tracking pairs and re-encode the rest sorted by name. The sort is
/// stable, so repeated names keep their relative order.
///
/// Pairs are decoded to bytes, not strings, so escapes that are not valid
/// UTF-8 survive unchanged.
fn filtered_query(url: &Url) -> String {
    let mut pairs: Vec<(Vec<u8>, Vec<u8>)> = url
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (decode_component(name), decode_component(value)),
            None => (decode_component(pair), Vec::new()),
        })
        .filter(|(name, _)| !is_tracking_name(name))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                form_urlencoded::byte_serialize(name).collect::<String>(),
                form_urlencoded::byte_serialize(value).collect::<String>()
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Form decoding: `+` is a space, then percent escapes.
fn decode_component(raw: &str) -> Vec<u8> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).collect()
}

/// Whether a decoded query key names a tracking parameter.
pub fn is_tracking_name(name: &[u8]) -> bool {
    TRACKING_PARAMS.iter().any(|param| param.as_bytes() == name)
}

/// Strip trailing slashes from any path other than `/`.
///
/// Repeats until stable so that `/a//` and its output normalize alike.
fn trim_trailing_slash(path: &str) -> &str {
    let mut trimmed = path;
    while trimmed != "/" && trimmed.ends_with('/') {
        trimmed = &trimmed[..trimmed.len() - 1];
    }
    trimmed
}

fn domain(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
