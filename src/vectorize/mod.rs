//! Vectorization pipeline: binary mask → simplified lattice rings.
//!
//! 1. Fill / hole region separation (8-connected ink, 4-connected holes)
//! 2. Boundary tracing on the lattice-corner grid
//! 3. Collinear point removal

pub mod outline;
pub mod regions;
pub mod simplify;

use log::{debug, warn};

use crate::bitmap::{CellRect, PixelMask};

use outline::PixelPath;
use regions::Region;

/// Traced rings of one mask, still in raster lattice coordinates.
#[derive(Debug, Clone)]
pub struct Outline {
    /// Fill rings in discovery order.
    pub fills: Vec<PixelPath>,
    /// Hole rings in discovery order, wound the same way as fills.
    pub holes: Vec<PixelPath>,
    /// Bounding box of all ink, `None` for an empty mask.
    pub ink: Option<CellRect>,
}

impl Outline {
    /// Right edge (exclusive) of the ink, 0 when there is none.
    pub fn right(&self) -> i32 {
        self.ink.map_or(0, |r| r.right)
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }
}

/// Run the full vectorization pipeline on one mask.
pub fn vectorize(mask: &PixelMask) -> Outline {
    let (fills, holes) = regions::separate(mask);
    debug!(
        "{}x{} mask: {} fill, {} hole regions",
        mask.width(),
        mask.height(),
        fills.len(),
        holes.len()
    );

    Outline {
        fills: trace_all(&fills),
        holes: trace_all(&holes),
        ink: mask.bounds(),
    }
}

/// Trace and simplify each region. A region the tracer rejects is dropped
/// with a warning rather than failing the glyph.
fn trace_all(regions: &[Region]) -> Vec<PixelPath> {
    regions
        .iter()
        .filter_map(|region| match outline::trace(region) {
            Ok(path) => Some(simplify::simplify(&path)),
            Err(e) => {
                warn!("dropping {:?} ring: {}", region.kind, e);
                None
            }
        })
        .collect()
}
