//! Style catalog and the style→image lookup.
//!
//! The demo ships five canned looks; each maps to a fixed pre-rendered
//! image. The lookup is total: tags outside the catalog resolve to
//! [`FALLBACK_IMAGE_URL`], so a stale or hand-edited tag still renders.

use std::fmt;

/// Image returned for any tag outside the catalog.
pub const FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=800&h=600&fit=crop";

/// The looks a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Editorial,
    Streetwear,
    Vintage,
    Minimalist,
    Cinematic,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Editorial,
        Style::Streetwear,
        Style::Vintage,
        Style::Minimalist,
        Style::Cinematic,
    ];

    /// Wire tag, as stored in requests and results.
    pub fn tag(self) -> &'static str {
        match self {
            Style::Editorial => "editorial",
            Style::Streetwear => "streetwear",
            Style::Vintage => "vintage",
            Style::Minimalist => "minimalist",
            Style::Cinematic => "cinematic",
        }
    }

    /// Display name for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Style::Editorial => "Editorial",
            Style::Streetwear => "Streetwear",
            Style::Vintage => "Vintage",
            Style::Minimalist => "Minimalist",
            Style::Cinematic => "Cinematic",
        }
    }

    /// One-line description shown under the label.
    pub fn blurb(self) -> &'static str {
        match self {
            Style::Editorial => "Clean, professional magazine-style photography",
            Style::Streetwear => "Urban, contemporary fashion aesthetic",
            Style::Vintage => "Classic, timeless retro styling",
            Style::Minimalist => "Simple, clean, and modern approach",
            Style::Cinematic => "Movie-like dramatic lighting and composition",
        }
    }

    /// Canned render for this style.
    pub fn image_url(self) -> &'static str {
        match self {
            Style::Editorial => "https://res.cloudinary.com/dozxkqzhc/image/upload/v1756383612/editorial_stevesmith_c0eutc.pngp",
            Style::Streetwear => "https://res.cloudinary.com/dozxkqzhc/image/upload/v1756384094/streetwear_stevesmith_2_hzgvma.png",
            Style::Vintage => "https://res.cloudinary.com/dozxkqzhc/image/upload/v1756383612/vintage_stevemith_re0fam.png",
            Style::Minimalist => "https://res.cloudinary.com/dozxkqzhc/image/upload/v1756383615/minimalist_stavesmith_nnvltz.png",
            Style::Cinematic => "https://res.cloudinary.com/dozxkqzhc/image/upload/v1756383612/cinematic_stevesmith_avsfm1.png",
        }
    }

    /// Parse a wire tag. Tags are exact and lowercase.
    pub fn from_tag(tag: &str) -> Option<Style> {
        Style::ALL.into_iter().find(|style| style.tag() == tag)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Resolve any tag to an image URL, falling back for unknown tags.
pub fn image_url_for(tag: &str) -> &'static str {
    Style::from_tag(tag).map(Style::image_url).unwrap_or(FALLBACK_IMAGE_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_round_trips_through_its_tag() {
        for style in Style::ALL {
            assert_eq!(Style::from_tag(style.tag()), Some(style));
        }
    }

    #[test]
    fn known_tags_resolve_to_their_canned_image() {
        assert_eq!(image_url_for("editorial"), Style::Editorial.image_url());
        assert_eq!(image_url_for("cinematic"), Style::Cinematic.image_url());
    }

    #[test]
    fn unknown_tags_resolve_to_the_fallback() {
        assert_eq!(image_url_for("baroque"), FALLBACK_IMAGE_URL);
        assert_eq!(image_url_for(""), FALLBACK_IMAGE_URL);
        // Tags are exact; case variants are unknown tags.
        assert_eq!(image_url_for("Editorial"), FALLBACK_IMAGE_URL);
    }

    #[test]
    fn catalog_metadata_is_filled_in() {
        for style in Style::ALL {
            assert!(!style.label().is_empty());
            assert!(!style.blurb().is_empty());
            assert!(style.image_url().starts_with("https://"));
        }
    }

    #[test]
    fn display_uses_the_wire_tag() {
        assert_eq!(Style::Streetwear.to_string(), "streetwear");
    }
}
