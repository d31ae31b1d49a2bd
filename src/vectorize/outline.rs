//! Boundary tracing on the lattice-corner grid.
//!
//! The walker moves between pixel corners, never through pixel centers,
//! so a straight edge of N pixels produces N+1 collinear corners that the
//! simplifier later collapses. Ink is kept on the right-hand side of the
//! walk in raster (y-down) coordinates: rings run clockwise on screen.

use crate::bitmap::PixelMask;
use crate::error::ConvertError;
use crate::geom::lattice_area;

use super::regions::{Region, RegionKind};

/// A closed ring of lattice corners in raster coordinates.
///
/// Closure is implicit: the last point connects back to the first, and
/// no point is repeated to close the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelPath {
    pub points: Vec<(i32, i32)>,
    pub kind: RegionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    fn step(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Facing::Up => (x, y - 1),
            Facing::Down => (x, y + 1),
            Facing::Left => (x - 1, y),
            Facing::Right => (x + 1, y),
        }
    }
}

/// Trace the outer boundary of one region.
///
/// Starts at the top-left corner of the region's first cell in raster
/// order and walks until it returns there. The walk is bounded by the
/// number of lattice edges in the mask, so a malformed region yields
/// `UnclosedBoundary` instead of spinning.
pub fn trace(region: &Region) -> Result<PixelPath, ConvertError> {
    let mask = &region.mask;
    let start = mask.first_set().ok_or(ConvertError::EmptyRegion)?;
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let max_steps = (w + 1) * h + w * (h + 1);

    let mut facing = Facing::Up;
    let mut pos = start;
    let mut points = Vec::new();

    loop {
        facing = next_facing(mask, pos, facing, region.kind).ok_or(ConvertError::UnclosedBoundary {
            steps: points.len(),
        })?;
        pos = facing.step(pos);
        points.push(pos);

        if pos == start {
            break;
        }
        if points.len() > max_steps {
            return Err(ConvertError::UnclosedBoundary { steps: points.len() });
        }
    }

    debug_assert!(lattice_area(&points) > 0, "traced ring must run clockwise on screen");
    Ok(PixelPath {
        points,
        kind: region.kind,
    })
}

/// Pick the edge to leave corner (x, y) along, from the four cells that
/// meet at it.
///
/// Decision order:
///
///   cells set                │ fill                      │ hole
///   ─────────────────────────┼───────────────────────────┼──────────────────────────
///   TL, BR only (pinch)      │ Up → Left, else Right     │ Up → Right, else Left
///   TR, BL only (pinch)      │ Right → Up, else Down     │ Right → Down, else Up
///   TL, not BL               │ Left
///   TR, not TL               │ Up
///   BR, not TR               │ Right
///   BL, not BR               │ Down
///
/// At a pinch a fill ring turns left, joining the two diagonal cells as
/// 8-connected ink. A hole ring turns right and keeps them apart, so it
/// follows the 4-connected boundary and never wraps the ink cell between
/// them. Either way the ring touches itself at the pinch corner but never
/// crosses.
fn next_facing(mask: &PixelMask, (x, y): (i32, i32), facing: Facing, kind: RegionKind) -> Option<Facing> {
    let top_left = mask.get(x - 1, y - 1);
    let top_right = mask.get(x, y - 1);
    let bottom_left = mask.get(x - 1, y);
    let bottom_right = mask.get(x, y);

    let join = kind == RegionKind::Fill;

    if top_left && bottom_right && !top_right && !bottom_left {
        Some(match (facing == Facing::Up, join) {
            (true, true) => Facing::Left,
            (true, false) => Facing::Right,
            (false, true) => Facing::Right,
            (false, false) => Facing::Left,
        })
    } else if top_right && bottom_left && !top_left && !bottom_right {
        Some(match (facing == Facing::Right, join) {
            (true, true) => Facing::Up,
            (true, false) => Facing::Down,
            (false, true) => Facing::Down,
            (false, false) => Facing::Up,
        })
    } else if top_left && !bottom_left {
        Some(Facing::Left)
    } else if top_right && !top_left {
        Some(Facing::Up)
    } else if bottom_right && !top_right {
        Some(Facing::Right)
    } else if bottom_left && !bottom_right {
        Some(Facing::Down)
    } else {
        None
    }
}
