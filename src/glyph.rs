//! Glyph assembly: lattice rings → one font-ready outline.

use kurbo::{BezPath, Point, Rect, Shape};

use crate::geom::signed_area;
use crate::transform::Transform;
use crate::vectorize::outline::PixelPath;

/// Whether a contour is an outer boundary or a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourType {
    Outer,
    Counter,
}

/// One character's outline and metrics, in design units.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub advance_width: f64,
    /// Top of the outline above the baseline, 0 for an empty glyph.
    pub height: f64,
    /// Closed line contours: fills first, then holes.
    pub paths: Vec<BezPath>,
    /// Classification of each contour.
    pub contour_types: Vec<ContourType>,
}

impl Glyph {
    /// A glyph with no outline, only an advance.
    pub fn empty(advance_width: f64) -> Self {
        Glyph {
            advance_width,
            height: 0.0,
            paths: Vec::new(),
            contour_types: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Union of all contour bounding boxes.
    pub fn bounds(&self) -> Option<Rect> {
        self.paths
            .iter()
            .map(|p| p.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    /// All contours in a single path. An empty glyph becomes a degenerate
    /// move + close at the origin, which outline builders accept as a
    /// zero-area glyph.
    pub fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.paths.is_empty() {
            path.move_to(Point::ZERO);
            path.close_path();
            return path;
        }
        for contour in &self.paths {
            for el in contour.elements() {
                path.push(*el);
            }
        }
        path
    }
}

/// Combine traced rings into a glyph.
///
/// Fill rings keep their traced order and direction. Hole rings follow,
/// each reversed, so under the nonzero rule they cancel the fill around
/// them. After the Y flip fills run clockwise and holes counter-clockwise,
/// the TrueType convention.
pub fn assemble(
    fills: &[PixelPath],
    holes: &[PixelPath],
    transform: &Transform,
    advance_width: f64,
) -> Glyph {
    let mut paths = Vec::with_capacity(fills.len() + holes.len());
    let mut contour_types = Vec::with_capacity(fills.len() + holes.len());

    for ring in fills {
        let path = transform.ring_to_path(ring.points.iter().copied());
        debug_assert!(signed_area(&path) <= 0.0, "fill ring must run clockwise");
        paths.push(path);
        contour_types.push(ContourType::Outer);
    }
    for ring in holes {
        let path = transform.ring_to_path(ring.points.iter().rev().copied());
        debug_assert!(signed_area(&path) >= 0.0, "hole ring must run counter-clockwise");
        paths.push(path);
        contour_types.push(ContourType::Counter);
    }

    let mut glyph = Glyph {
        advance_width,
        height: 0.0,
        paths,
        contour_types,
    };
    glyph.height = glyph.bounds().map_or(0.0, |b| b.y1.max(0.0));
    glyph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::PixelMask;
    use crate::vectorize::vectorize;
    use kurbo::PathEl;

    fn glyph(rows: &[&str]) -> Glyph {
        let mask = PixelMask::from_rows(rows);
        let outline = vectorize(&mask);
        let t = Transform::new(mask.height(), 2.0);
        assemble(&outline.fills, &outline.holes, &t, 0.0)
    }

    #[test]
    fn hole_winds_opposite_to_fill() {
        let g = glyph(&["###", "#.#", "###"]);
        assert_eq!(g.paths.len(), 2);
        assert_eq!(g.contour_types, vec![ContourType::Outer, ContourType::Counter]);
        let outer = signed_area(&g.paths[0]);
        let counter = signed_area(&g.paths[1]);
        // Clockwise outer, counter-clockwise hole.
        assert_eq!(outer, -36.0);
        assert_eq!(counter, 4.0);
    }

    #[test]
    fn fills_precede_holes() {
        let g = glyph(&["###.###", "#.#.#.#", "###.###"]);
        assert_eq!(
            g.contour_types,
            vec![
                ContourType::Outer,
                ContourType::Outer,
                ContourType::Counter,
                ContourType::Counter
            ]
        );
    }

    #[test]
    fn height_is_top_of_ink() {
        let g = glyph(&["...", ".#.", ".#."]);
        assert_eq!(g.height, 4.0);
        assert_eq!(glyph(&["..", ".."]).height, 0.0);
    }

    #[test]
    fn empty_glyph_outline_is_degenerate() {
        let g = Glyph::empty(8.0);
        assert!(g.is_empty());
        assert_eq!(g.advance_width, 8.0);
        assert_eq!(
            g.outline().elements(),
            &[PathEl::MoveTo(Point::ZERO), PathEl::ClosePath]
        );
    }

    #[test]
    fn outline_concatenates_contours() {
        let g = glyph(&["#.#"]);
        let moves = g
            .outline()
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }
}
