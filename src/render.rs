//! Raster rendering of glyph outlines for round-trip checks.
//!
//! Maps a glyph back onto the lattice it was traced from and fills it with
//! tiny-skia (nonzero winding, no anti-aliasing), so the result can be
//! compared cell for cell with the source mask.

use kurbo::{BezPath, PathEl};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap};

use crate::bitmap::PixelMask;
use crate::glyph::Glyph;
use crate::transform::Transform;

/// Overlap statistics between two masks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterDiff {
    pub overlap: usize,
    pub a_px: usize,
    pub b_px: usize,
    /// Intersection over union; 1.0 when both masks are empty.
    pub iou: f64,
}

impl RasterDiff {
    pub fn is_exact(&self) -> bool {
        self.overlap == self.a_px && self.overlap == self.b_px
    }
}

/// Convert a kurbo `BezPath` to a `tiny_skia::Path`.
fn kurbo_to_tinyskia(bezpath: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in bezpath.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Fill `glyph` on a `width × height` lattice, undoing `transform`.
///
/// A cell is set when its center is inside the outline. Exact for
/// unsheared glyphs; sheared ones only approximate their source.
pub fn rasterize(glyph: &Glyph, transform: &Transform, width: u32, height: u32) -> PixelMask {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return PixelMask::new(width, height);
    };

    let mut outline = glyph.outline();
    outline.apply_affine(transform.affine().inverse());

    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = false;

    if let Some(path) = kurbo_to_tinyskia(&outline) {
        pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    PixelMask::from_fn(width, height, |x, y| {
        pixmap.pixel(x, y).is_some_and(|p| p.alpha() > 127)
    })
}

/// Compare two masks cell by cell over the larger of their extents.
pub fn compare(a: &PixelMask, b: &PixelMask) -> RasterDiff {
    let w = a.width().max(b.width()) as i32;
    let h = a.height().max(b.height()) as i32;
    let mut overlap = 0;
    for y in 0..h {
        for x in 0..w {
            if a.get(x, y) && b.get(x, y) {
                overlap += 1;
            }
        }
    }
    let (a_px, b_px) = (a.count(), b.count());
    let union = a_px + b_px - overlap;
    let iou = if union == 0 {
        1.0
    } else {
        overlap as f64 / union as f64
    };
    RasterDiff {
        overlap,
        a_px,
        b_px,
        iou,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Style;
    use crate::transform::{embolden, fallback_mask};
    use crate::trace_glyph;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn round_trip(mask: &PixelMask, style: Style) -> RasterDiff {
        let t = Transform::new(mask.height(), 2.0).with_baseline(mask.height() as f64 - 1.0);
        let glyph = trace_glyph(mask, &t, style, 0.0);
        let expected = if style.is_bold() {
            embolden(mask)
        } else {
            mask.clone()
        };
        let rendered = rasterize(&glyph, &t, expected.width(), expected.height());
        compare(&rendered, &expected)
    }

    #[test]
    fn holes_render_unfilled() {
        let mask = PixelMask::from_rows(&["###", "#.#", "###"]);
        let diff = round_trip(&mask, Style::Regular);
        assert!(diff.is_exact(), "{diff:?}");
        assert_eq!(diff.a_px, 8);
    }

    #[test]
    fn shapes_round_trip_exactly() {
        let shapes: [&[&str]; 4] = [
            &["###.", "#...", "####", "...#"],
            &[".##.", "#..#", "####", "#..#"],
            &["#####", "#...#", "#.#.#", "#...#", "#####"],
            &["#.#", ".#.", "#.#"],
        ];
        for rows in shapes {
            let mask = PixelMask::from_rows(rows);
            for style in [Style::Regular, Style::Bold] {
                let diff = round_trip(&mask, style);
                assert!(diff.is_exact(), "{rows:?} {style}: {diff:?}");
            }
        }
        let diff = round_trip(&fallback_mask(), Style::Regular);
        assert!(diff.is_exact(), "{diff:?}");
    }

    #[test]
    fn ink_between_diagonal_hole_cells_stays_filled() {
        let mask = PixelMask::from_rows(&["#####", "#...#", "#.#.#", "#..##", "#####"]);
        for style in [Style::Regular, Style::Bold] {
            let diff = round_trip(&mask, style);
            assert!(diff.is_exact(), "{style}: {diff:?}");
        }
        let mask = PixelMask::from_rows(&[".##...", "######", "#...##", "#.#.##", "##..#.", "#.##.#"]);
        assert!(round_trip(&mask, Style::Regular).is_exact());
    }

    #[test]
    fn every_4x4_mask_round_trips() {
        for bits in 0u32..(1 << 16) {
            let mask = PixelMask::from_fn(4, 4, |x, y| bits & (1 << (y * 4 + x)) != 0);
            let diff = round_trip(&mask, Style::Regular);
            assert!(diff.is_exact(), "{bits:#06x}: {diff:?}");
        }
    }

    #[test]
    fn random_masks_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2000 {
            let (w, h) = (rng.gen_range(5..=8), rng.gen_range(5..=8));
            let mask = PixelMask::from_fn(w, h, |_, _| rng.gen_bool(0.55));
            for style in [Style::Regular, Style::Bold] {
                let diff = round_trip(&mask, style);
                assert!(diff.is_exact(), "{mask:?} {style}: {diff:?}");
            }
        }
    }

    #[test]
    fn empty_glyph_renders_nothing() {
        let mask = PixelMask::new(4, 4);
        let diff = round_trip(&mask, Style::Regular);
        assert_eq!(diff.a_px, 0);
        assert_eq!(diff.iou, 1.0);
    }

    #[test]
    fn compare_counts_overlap() {
        let a = PixelMask::from_rows(&["##.."]);
        let b = PixelMask::from_rows(&[".##."]);
        let diff = compare(&a, &b);
        assert_eq!((diff.overlap, diff.a_px, diff.b_px), (1, 2, 2));
        assert!((diff.iou - 1.0 / 3.0).abs() < 1e-12);
        assert!(!diff.is_exact());
    }
}
