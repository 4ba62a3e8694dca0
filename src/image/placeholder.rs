use base64::Engine;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Shape of the blurred-in placeholder shown while an image loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    Square,
    #[default]
    Video,
    Wide,
}

impl AspectRatio {
    /// Width and height of the intrinsic ratio.
    pub fn ratio(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::Video => (16, 9),
            AspectRatio::Wide => (21, 9),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "square",
            AspectRatio::Video => "video",
            AspectRatio::Wide => "wide",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aspect ratio {0:?} (expected square, video or wide)")]
pub struct ParseAspectRatioError(String);

impl FromStr for AspectRatio {
    type Err = ParseAspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(AspectRatio::Square),
            "video" => Ok(AspectRatio::Video),
            "wide" => Ok(AspectRatio::Wide),
            _ => Err(ParseAspectRatioError(s.to_string())),
        }
    }
}

fn svg_data_uri(kind: AspectRatio) -> String {
    let (w, h) = kind.ratio();
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="#e5e7eb"/></svg>"##
    );
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg)
    )
}

static SQUARE: LazyLock<String> = LazyLock::new(|| svg_data_uri(AspectRatio::Square));
static VIDEO: LazyLock<String> = LazyLock::new(|| svg_data_uri(AspectRatio::Video));
static WIDE: LazyLock<String> = LazyLock::new(|| svg_data_uri(AspectRatio::Wide));

/// Inline SVG data URI with the intrinsic ratio of `kind`.
pub fn placeholder(kind: AspectRatio) -> &'static str {
    match kind {
        AspectRatio::Square => SQUARE.as_str(),
        AspectRatio::Video => VIDEO.as_str(),
        AspectRatio::Wide => WIDE.as_str(),
    }
}
