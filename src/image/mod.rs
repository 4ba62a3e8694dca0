//! Image URL helpers for the card and hero components.
//!
//! URLs on the recognized host get width/format/crop/quality parameters;
//! everything else passes through untouched.

mod placeholder;

pub use placeholder::{placeholder, AspectRatio, ParseAspectRatioError};

use log::debug;
use url::Url;

/// Substring that marks a URL as served by the optimizing image host.
pub const IMAGE_HOST: &str = "unsplash.com";
pub const QUALITY: u32 = 80;
pub const RESPONSIVE_WIDTHS: [u32; 6] = [640, 750, 828, 1080, 1200, 1920];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageUrlError {
    #[error("invalid image URL {url:?}: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Return `url` rewritten for delivery at `width` pixels.
///
/// Empty input yields an empty string and unrecognized hosts are returned as
/// is. A width of zero is treated as absent. Parameters already present are
/// overwritten, so optimizing twice gives the same parameter values.
///
/// # Examples
///
/// - `optimize("https://images.unsplash.com/p.jpg", Some(800))` →
///   `"https://images.unsplash.com/p.jpg?w=800&auto=format&fit=crop&q=80"`
/// - `optimize("https://example.com/p.jpg", Some(800))` → unchanged
pub fn optimize(url: &str, width: Option<u32>) -> Result<String, ImageUrlError> {
    match parse_recognized(url)? {
        Some(mut parsed) => {
            set_delivery_params(&mut parsed, width.filter(|w| *w > 0));
            Ok(parsed.into())
        }
        None => Ok(url.to_string()),
    }
}

/// Build a `srcset` value listing `url` at each of [`RESPONSIVE_WIDTHS`].
pub fn build_source_set(url: &str) -> Result<String, ImageUrlError> {
    if parse_recognized(url)?.is_none() {
        return Ok(url.to_string());
    }
    let entries = RESPONSIVE_WIDTHS
        .iter()
        .map(|w| optimize(url, Some(*w)).map(|u| format!("{} {}w", u, w)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries.join(",\n").trim().to_string())
}

// None means pass-through: empty input, no host substring, or a host that
// does not actually belong to the image provider.
fn parse_recognized(url: &str) -> Result<Option<Url>, ImageUrlError> {
    if url.is_empty() || !url.contains(IMAGE_HOST) {
        return Ok(None);
    }
    let parsed = Url::parse(url).map_err(|source| ImageUrlError::Parse {
        url: url.to_string(),
        source,
    })?;
    if parsed.host_str().is_some_and(|h| h.contains(IMAGE_HOST)) {
        Ok(Some(parsed))
    } else {
        debug!("image host substring outside hostname, passing through: {}", url);
        Ok(None)
    }
}

fn set_delivery_params(url: &mut Url, width: Option<u32>) {
    let mut params: Vec<(&str, String)> = Vec::with_capacity(4);
    if let Some(w) = width {
        params.push(("w", w.to_string()));
    }
    params.push(("auto", "format".to_string()));
    params.push(("fit", "crop".to_string()));
    params.push(("q", QUALITY.to_string()));

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(key, _)| k == key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .extend_pairs(&params);
}
