use std::fmt;

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Shown by front ends when a movie has no artwork.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-movie.jpg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    W92,
    W185,
    W300,
    #[default]
    W500,
    Original,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W185 => "w185",
            Self::W300 => "w300",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "w92" => Some(Self::W92),
            "w185" => Some(Self::W185),
            "w300" => Some(Self::W300),
            "w500" => Some(Self::W500),
            "original" => Some(Self::Original),
            _ => None,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully qualified image URL for an API image path.
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE}/{size}{p}"),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_sized_url() {
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::W500),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn missing_path_gives_placeholder() {
        assert_eq!(image_url(None, ImageSize::W185), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(Some(""), ImageSize::W185), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn size_tokens_parse() {
        assert_eq!(ImageSize::parse("w300"), Some(ImageSize::W300));
        assert_eq!(ImageSize::parse("w4000"), None);
    }
}
