use std::fmt;
use std::str::FromStr;

/// Horizontal shear applied to italic styles, in lattice units of x per
/// unit of height above the baseline.
pub const ITALIC_SHEAR: f64 = 0.25;

/// All conversion parameters in one struct.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    // -- Scaling --
    /// Design units per line unit. A bitmap provider whose declared height
    /// equals its cell height gets exactly this scale per pixel.
    pub units_per_pixel: f64,
    /// Units per em written by output backends.
    pub units_per_em: f64,

    // -- Bitmap stage --
    /// A pixel is ink when its alpha is strictly above this value.
    pub alpha_threshold: u8,

    // -- Styles --
    /// Output styles, one glyph set each.
    pub styles: Vec<Style>,
    /// Shear ratio for italic styles.
    pub italic_shear: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            units_per_pixel: 2.0,
            units_per_em: 24.0,
            alpha_threshold: 127,
            styles: vec![Style::Regular, Style::Bold],
            italic_shear: ITALIC_SHEAR,
        }
    }
}

/// A synthesized font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Style {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Regular, Style::Bold, Style::Italic, Style::BoldItalic];

    pub fn is_bold(self) -> bool {
        matches!(self, Style::Bold | Style::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Style::Italic | Style::BoldItalic)
    }

    pub fn name(self) -> &'static str {
        match self {
            Style::Regular => "regular",
            Style::Bold => "bold",
            Style::Italic => "italic",
            Style::BoldItalic => "bold-italic",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "regular" => Ok(Style::Regular),
            "bold" => Ok(Style::Bold),
            "italic" => Ok(Style::Italic),
            "bold-italic" | "bolditalic" => Ok(Style::BoldItalic),
            other => Err(format!("unknown style {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_names_parse_back() {
        for style in Style::ALL {
            assert_eq!(style.name().parse::<Style>(), Ok(style));
        }
        assert_eq!("BoldItalic".parse::<Style>(), Ok(Style::BoldItalic));
        assert!("oblique".parse::<Style>().is_err());
    }

    #[test]
    fn style_flags() {
        assert!(!Style::Regular.is_bold() && !Style::Regular.is_italic());
        assert!(Style::Bold.is_bold() && !Style::Bold.is_italic());
        assert!(!Style::Italic.is_bold() && Style::Italic.is_italic());
        assert!(Style::BoldItalic.is_bold() && Style::BoldItalic.is_italic());
    }
}
