//! Font handles and text alignment.
//!
//! The list never shapes or rasterizes text itself. A [`Font`] is only a
//! description that the host's painter resolves to real face data, and the
//! size travels separately so a theme can supply it per node.

/// A font family, either generic or named.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// The host's default sans-serif face.
    #[default]
    SansSerif,
    /// The host's default serif face.
    Serif,
    /// The host's default monospace face.
    Monospace,
    /// A specific family name such as `"Inter"`.
    Name(String),
}

impl FontFamily {
    /// Parse a family from its configuration spelling.
    ///
    /// `sans-serif`, `serif` and `monospace` map to the generic families,
    /// anything else is treated as a family name.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sans-serif" | "sans" => FontFamily::SansSerif,
            "serif" => FontFamily::Serif,
            "monospace" | "mono" => FontFamily::Monospace,
            _ => FontFamily::Name(name.trim().to_string()),
        }
    }
}

/// Font weight on the usual 100-900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Regular weight (400).
    pub const NORMAL: Self = Self(400);
    /// Medium weight (500).
    pub const MEDIUM: Self = Self(500);
    /// Bold weight (700).
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A font description passed through to the painter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Font {
    family: FontFamily,
    weight: FontWeight,
}

impl Font {
    /// Create a font with the given family at normal weight.
    pub fn new(family: FontFamily) -> Self {
        Self {
            family,
            weight: FontWeight::NORMAL,
        }
    }

    /// Set the weight using builder pattern.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// The font family.
    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// The font weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }
}

/// Horizontal text alignment within the wrap width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    /// Left-aligned text (default for LTR languages).
    #[default]
    Left,
    /// Center-aligned text.
    Center,
    /// Right-aligned text (default for RTL languages).
    Right,
    /// Justified text (stretched to fill width).
    Justified,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_parse() {
        assert_eq!(FontFamily::parse("serif"), FontFamily::Serif);
        assert_eq!(FontFamily::parse(" Mono "), FontFamily::Monospace);
        assert_eq!(FontFamily::parse("Inter"), FontFamily::Name("Inter".into()));
    }

    #[test]
    fn test_font_builder() {
        let font = Font::new(FontFamily::Serif).with_weight(FontWeight::BOLD);
        assert_eq!(font.family(), &FontFamily::Serif);
        assert_eq!(font.weight(), FontWeight::BOLD);
        assert_eq!(Font::default().weight(), FontWeight::NORMAL);
    }
}
