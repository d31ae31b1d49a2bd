//! Binary pixel masks.
//!
//! A `PixelMask` is a flat boolean array in raster order (y=0 is the top
//! row). Sampling outside the mask is never an error: it reads as unset,
//! which lets the tracer look at all four cells around a lattice corner
//! without bounds bookkeeping.

use image::{GrayImage, Luma, RgbaImage};
use imageproc::contrast::{threshold, ThresholdType};

/// Cell-aligned bounding box. `right` and `bottom` are exclusive, so the
/// box doubles as the lattice-corner extent of the cells it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CellRect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn union(&self, other: &CellRect) -> CellRect {
        CellRect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl PixelMask {
    /// An all-clear `width × height` mask.
    pub fn new(width: u32, height: u32) -> Self {
        PixelMask {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = PixelMask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    mask.set(x as i32, y as i32);
                }
            }
        }
        mask
    }

    /// Build a mask from ASCII rows, `#` marking ink. Rows shorter than the
    /// longest one are padded with clear cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let grid: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        PixelMask::from_fn(width, rows.len() as u32, |x, y| {
            grid[y as usize].get(x as usize).copied().unwrap_or(false)
        })
    }

    /// Threshold an RGBA cell image on its alpha channel.
    ///
    /// A pixel is ink when its alpha is strictly greater than `alpha_threshold`.
    pub fn from_rgba(img: &RgbaImage, alpha_threshold: u8) -> Self {
        let (w, h) = img.dimensions();
        let alpha = GrayImage::from_fn(w, h, |x, y| Luma([img.get_pixel(x, y).0[3]]));
        PixelMask::from_gray(&threshold(&alpha, alpha_threshold, ThresholdType::Binary))
    }

    /// Non-zero pixels are ink.
    pub fn from_gray(img: &GrayImage) -> Self {
        let (w, h) = img.dimensions();
        PixelMask::from_fn(w, h, |x, y| img.get_pixel(x, y).0[0] > 0)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell at (x, y). Out-of-bounds = false.
    pub fn get(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => self.cells[i],
            None => false,
        }
    }

    pub(crate) fn set(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = true;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// OR `other` into this mask with its origin at (dx, dy). Cells that land
    /// outside this mask are dropped.
    pub(crate) fn paint(&mut self, other: &PixelMask, dx: i32, dy: i32) {
        for (x, y) in other.set_cells() {
            self.set(x + dx, y + dy);
        }
    }

    /// A copy embedded in a canvas grown by `pad` cells on every side.
    pub fn padded(&self, pad: u32) -> Self {
        let mut canvas = PixelMask::new(self.width + 2 * pad, self.height + 2 * pad);
        canvas.paint(self, pad as i32, pad as i32);
        canvas
    }

    /// Every cell flipped.
    pub fn inverted(&self) -> Self {
        PixelMask {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|c| !c).collect(),
        }
    }

    /// Coordinates of set cells in raster order.
    pub fn set_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .map(move |(i, _)| ((i % w) as i32, (i / w) as i32))
    }

    /// First set cell in raster order.
    pub fn first_set(&self) -> Option<(i32, i32)> {
        self.set_cells().next()
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Bounding box of all set cells, or `None` for an empty mask.
    pub fn bounds(&self) -> Option<CellRect> {
        self.set_cells().fold(None, |acc, (x, y)| {
            let cell = CellRect {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            };
            Some(match acc {
                Some(r) => cell.union(&r),
                None => cell,
            })
        })
    }
}
