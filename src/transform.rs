//! Raster → design-unit transforms and mask-level style synthesis.

use kurbo::{Affine, BezPath, Point};

use crate::bitmap::PixelMask;

/// Cell size of the fallback glyph drawn for `.notdef`.
pub const FALLBACK_WIDTH: u32 = 5;
pub const FALLBACK_HEIGHT: u32 = 8;
/// Row of the fallback glyph that sits on the baseline.
pub const FALLBACK_ASCENT: u32 = 7;

/// Maps lattice corners to design units.
///
/// `(x, y)` becomes `(s·(x + k·(B − y)), s·(B − y))` with `s = scale`,
/// `B = baseline` and `k = shear`, rounded to whole units. The Y flip turns
/// raster rows (top-down) into font coordinates (bottom-up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Design units per lattice unit.
    pub scale: f64,
    /// Lattice row mapped to y = 0.
    pub baseline: f64,
    /// Horizontal shear per lattice unit above the baseline.
    pub shear: f64,
}

impl Transform {
    /// Baseline at the bottom of a mask `height` rows tall, no shear.
    pub fn new(height: u32, scale: f64) -> Self {
        Transform {
            scale,
            baseline: height as f64,
            shear: 0.0,
        }
    }

    pub fn with_baseline(self, baseline: f64) -> Self {
        Transform { baseline, ..self }
    }

    pub fn with_shear(self, shear: f64) -> Self {
        Transform { shear, ..self }
    }

    /// The unrounded mapping as an affine matrix.
    pub fn affine(&self) -> Affine {
        let s = self.scale;
        let k = self.shear;
        let b = self.baseline;
        Affine::new([s, 0.0, -s * k, -s, s * k * b, s * b])
    }

    pub fn apply(&self, (x, y): (i32, i32)) -> Point {
        let p = self.affine() * Point::new(x as f64, y as f64);
        Point::new(p.x.round(), p.y.round())
    }

    /// Closed line path through `points` in order.
    pub fn ring_to_path(&self, points: impl IntoIterator<Item = (i32, i32)>) -> BezPath {
        let mut path = BezPath::new();
        let mut points = points.into_iter();
        if let Some(first) = points.next() {
            path.move_to(self.apply(first));
            for p in points {
                path.line_to(self.apply(p));
            }
            path.close_path();
        }
        path
    }
}

/// Thicken a mask by one cell horizontally.
///
/// The canvas grows by one column and one row; the base mask is OR-ed in
/// at (0, 0) and again at (1, 0).
pub fn embolden(mask: &PixelMask) -> PixelMask {
    let mut bold = PixelMask::new(mask.width() + 1, mask.height() + 1);
    bold.paint(mask, 0, 0);
    bold.paint(mask, 1, 0);
    bold
}

/// Bordered rectangle drawn when a character has no bitmap.
pub fn fallback_mask() -> PixelMask {
    PixelMask::from_fn(FALLBACK_WIDTH, FALLBACK_HEIGHT, |x, y| {
        x == 0 || y == 0 || x == FALLBACK_WIDTH - 1 || y == FALLBACK_HEIGHT - 1
    })
}
