//! Shared geometry utilities.

use kurbo::{BezPath, PathEl, Point};

/// Signed area enclosed by the on-curve points of a path, closing each
/// subpath back to its start. Positive = counter-clockwise (y-up).
pub fn signed_area(path: &BezPath) -> f64 {
    let mut twice = 0.0;
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    let cross = |a: Point, b: Point| a.x * b.y - b.x * a.y;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                twice += cross(last, start);
                start = p;
                last = p;
            }
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                twice += cross(last, p);
                last = p;
            }
            PathEl::ClosePath => {
                twice += cross(last, start);
                last = start;
            }
        }
    }
    twice += cross(last, start);
    twice / 2.0
}

/// Signed area of a closed lattice ring, in cells.
///
/// In raster (y-down) coordinates a ring that runs clockwise on screen,
/// like every traced ring, has positive area.
pub fn lattice_area(points: &[(i32, i32)]) -> i64 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut twice: i64 = 0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice += points[i].0 as i64 * points[j].1 as i64 - points[j].0 as i64 * points[i].1 as i64;
    }
    twice / 2
}
