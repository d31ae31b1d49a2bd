//! Fill / hole region separation.
//!
//! Fill regions are the 8-connected components of the ink; holes are the
//! 4-connected background components that never reach the outside. The
//! pairing matters: with 4-connected ink, a counter whose walls only touch
//! diagonally (the top of a pixel-font `A`) would border two fill regions
//! and lie outside both of their rings.
//!
//! To find holes the mask is padded by one clear cell on every side and
//! inverted, so the whole exterior becomes a single component containing
//! the padded corner, which raster order always discovers first.

use crate::bitmap::PixelMask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Fill,
    Hole,
}

/// One connected component, stored as a mask the size of its source mask
/// holding only the component's cells.
#[derive(Debug, Clone)]
pub struct Region {
    pub kind: RegionKind,
    pub mask: PixelMask,
}

impl Region {
    fn from_cells(kind: RegionKind, width: u32, height: u32, cells: &[(i32, i32)], dx: i32, dy: i32) -> Self {
        let mut mask = PixelMask::new(width, height);
        for &(x, y) in cells {
            mask.set(x + dx, y + dy);
        }
        Region { kind, mask }
    }
}

/// Split a mask into (fill regions, hole regions), each in discovery order.
pub fn separate(mask: &PixelMask) -> (Vec<Region>, Vec<Region>) {
    let (w, h) = (mask.width(), mask.height());

    let fills = components(mask, &EIGHT_NEIGHBORS)
        .iter()
        .map(|cells| Region::from_cells(RegionKind::Fill, w, h, cells, 0, 0))
        .collect();

    let background = mask.padded(1).inverted();
    let holes = components(&background, &FOUR_NEIGHBORS)
        .iter()
        .skip(1)
        .map(|cells| Region::from_cells(RegionKind::Hole, w, h, cells, -1, -1))
        .collect();

    (fills, holes)
}

const FOUR_NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const EIGHT_NEIGHBORS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Connected components of the set cells, in raster discovery order.
/// Every cell is pushed at most once.
fn components(mask: &PixelMask, neighbors: &[(i32, i32)]) -> Vec<Vec<(i32, i32)>> {
    let w = mask.width() as i32;
    let mut visited = vec![false; mask.width() as usize * mask.height() as usize];
    let mut result = Vec::new();

    for (x0, y0) in mask.set_cells() {
        if visited[(y0 * w + x0) as usize] {
            continue;
        }
        visited[(y0 * w + x0) as usize] = true;
        let mut cells = Vec::new();
        let mut stack = vec![(x0, y0)];
        while let Some((x, y)) = stack.pop() {
            cells.push((x, y));
            for &(dx, dy) in neighbors {
                let (nx, ny) = (x + dx, y + dy);
                if mask.get(nx, ny) && !visited[(ny * w + nx) as usize] {
                    visited[(ny * w + nx) as usize] = true;
                    stack.push((nx, ny));
                }
            }
        }
        result.push(cells);
    }

    result
}
