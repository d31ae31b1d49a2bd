//! PostScript glyph names for codepoints.

use std::collections::HashMap;

use crate::error::ConvertError;

/// Codepoint → glyph name table, falling back to `uniXXXX` / `uXXXXX`.
#[derive(Debug, Clone, Default)]
pub struct GlyphNames {
    names: HashMap<char, String>,
}

impl GlyphNames {
    /// Parse an AGLFN-style list: `XXXX;name;description` per line, with `#`
    /// comments and blank lines ignored.
    pub fn parse_aglfn(text: &str) -> Result<Self, ConvertError> {
        let mut names = HashMap::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let invalid = |reason: &str| ConvertError::InvalidNameList {
                line: i + 1,
                reason: reason.to_string(),
            };
            let mut fields = line.split(';');
            let (Some(hex), Some(name)) = (fields.next(), fields.next()) else {
                return Err(invalid("expected `codepoint;name;description`"));
            };
            let value = u32::from_str_radix(hex.trim(), 16).map_err(|_| invalid("bad codepoint"))?;
            let c = char::from_u32(value).ok_or_else(|| invalid("codepoint is not a scalar value"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(invalid("empty glyph name"));
            }
            names.insert(c, name.to_string());
        }
        Ok(GlyphNames { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Listed name, or the generic `uniXXXX` (BMP) / `uXXXXX` (astral) form.
    pub fn name(&self, c: char) -> String {
        if let Some(name) = self.names.get(&c) {
            return name.clone();
        }
        let value = c as u32;
        if value <= 0xFFFF {
            format!("uni{value:04X}")
        } else {
            format!("u{value:05X}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Name:          Adobe Glyph List For New Fonts
#
0041;A;LATIN CAPITAL LETTER A
00C6;AE;LATIN CAPITAL LETTER AE

0020;space;SPACE
";

    #[test]
    fn listed_names() {
        let names = GlyphNames::parse_aglfn(SAMPLE).unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(names.name('A'), "A");
        assert_eq!(names.name('\u{C6}'), "AE");
        assert_eq!(names.name(' '), "space");
    }

    #[test]
    fn generic_names() {
        let names = GlyphNames::default();
        assert_eq!(names.name('\u{e9}'), "uni00E9");
        assert_eq!(names.name('\u{1F600}'), "u1F600");
    }

    #[test]
    fn malformed_lines_report_their_number() {
        let err = GlyphNames::parse_aglfn("0041;A;A\nzz;bad;BAD\n").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidNameList { line: 2, .. }));
        assert!(GlyphNames::parse_aglfn("0041").is_err());
        assert!(GlyphNames::parse_aglfn("D800;surrogate;X").is_err());
    }
}
