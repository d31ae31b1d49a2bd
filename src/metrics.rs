//! Advance widths and per-style bounding metrics.

use kurbo::Shape;

use crate::glyph::Glyph;

/// Advance for a bitmap glyph: one lattice unit of spacing after the ink's
/// right edge. An empty cell still advances by one unit.
pub fn advance_from_ink(right: i32, scale: f64) -> f64 {
    (right.max(0) + 1) as f64 * scale
}

/// Advance for a pure spacing character. Bold spacing is one unit wider,
/// matching the extra column bold synthesis adds to inked glyphs.
pub fn advance_from_spacing(width: i32, units_per_pixel: f64, bold: bool) -> f64 {
    let width = if bold { width + 1 } else { width };
    width as f64 * units_per_pixel
}

/// Font-level extents of one style, in design units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleMetrics {
    /// Rightmost outline x over all glyphs.
    pub max_right: f64,
    /// Highest outline y over all glyphs.
    pub max_top: f64,
    /// Lowest outline y over all glyphs (0 or negative).
    pub min_bottom: f64,
    /// Widest advance.
    pub max_advance: f64,
}

impl StyleMetrics {
    pub fn from_glyphs<'a>(glyphs: impl IntoIterator<Item = &'a Glyph>) -> Self {
        let mut metrics = StyleMetrics::default();
        for glyph in glyphs {
            metrics.max_advance = metrics.max_advance.max(glyph.advance_width);
            for path in &glyph.paths {
                let bbox = path.bounding_box();
                metrics.max_right = metrics.max_right.max(bbox.x1);
                metrics.max_top = metrics.max_top.max(bbox.y1);
                metrics.min_bottom = metrics.min_bottom.min(bbox.y0);
            }
        }
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::PixelMask;
    use crate::config::Style;
    use crate::transform::Transform;

    #[test]
    fn ink_advance_adds_one_unit() {
        assert_eq!(advance_from_ink(5, 2.0), 12.0);
        assert_eq!(advance_from_ink(0, 2.0), 2.0);
    }

    #[test]
    fn spacing_advance() {
        assert_eq!(advance_from_spacing(4, 2.0, false), 8.0);
        assert_eq!(advance_from_spacing(4, 2.0, true), 10.0);
    }

    #[test]
    fn metrics_span_all_glyphs() {
        let t = Transform::new(4, 2.0).with_baseline(3.0);
        let tall = crate::trace_glyph(&PixelMask::from_rows(&["#", "#", "#", "#"]), &t, Style::Regular, 0.0);
        let wide = crate::trace_glyph(&PixelMask::from_rows(&["", "", "####"]), &t, Style::Regular, 0.0);
        let m = StyleMetrics::from_glyphs([&tall, &wide]);
        assert_eq!(m.max_top, 6.0);
        assert_eq!(m.min_bottom, -2.0);
        assert_eq!(m.max_right, 8.0);
        assert_eq!(m.max_advance, 10.0);
    }
}
