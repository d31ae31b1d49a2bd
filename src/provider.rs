//! Glyph providers and the resources they reference.
//!
//! A font is an ordered list of providers. Reference providers name another
//! font whose providers are spliced in at that position; `flatten` expands
//! them depth-first before any glyph is produced.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use image::{imageops, ImageReader, RgbaImage};
use log::debug;

use crate::bitmap::PixelMask;
use crate::error::ConvertError;
use crate::transform::Transform;

/// Namespace assumed for ids written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespaced resource id such as `minecraft:font/ascii.png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    pub namespace: String,
    pub path: String,
}

impl ResourceId {
    pub fn parse(id: &str) -> Result<Self, ConvertError> {
        let (namespace, path) = match id.split_once(':') {
            Some((ns, path)) => (ns, path),
            None => (DEFAULT_NAMESPACE, id),
        };
        if namespace.is_empty() || path.is_empty() || path.contains(':') {
            return Err(ConvertError::InvalidResourceId(id.to_string()));
        }
        Ok(ResourceId {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Location of this id inside an asset tree, e.g.
    /// `assets/<namespace>/textures/<path>` for `kind = "textures"`.
    pub fn asset_path(&self, kind: &str) -> PathBuf {
        Path::new("assets").join(&self.namespace).join(kind).join(&self.path)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// A grid of characters laid over equal cells of one texture.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapProvider {
    pub file: ResourceId,
    /// Rendered height of one cell, in line units.
    pub height: i32,
    /// Rendered distance from the cell top to the baseline, in line units.
    pub ascent: i32,
    /// One string per cell row. `'\0'` marks an unused cell.
    pub chars: Vec<String>,
}

impl BitmapProvider {
    pub const DEFAULT_HEIGHT: i32 = 8;

    /// Rows as character vectors, checked for a usable grid.
    pub fn grid(&self) -> Result<Vec<Vec<char>>, ConvertError> {
        let rows: Vec<Vec<char>> = self.chars.iter().map(|r| r.chars().collect()).collect();
        let columns = rows.first().map_or(0, |r| r.len());
        if columns == 0 {
            return Err(ConvertError::InvalidProvider(format!("{}: empty chars grid", self.file)));
        }
        if rows.iter().any(|r| r.len() != columns) {
            return Err(ConvertError::InvalidProvider(format!(
                "{}: chars rows differ in length",
                self.file
            )));
        }
        if self.height <= 0 {
            return Err(ConvertError::InvalidProvider(format!(
                "{}: height must be positive, got {}",
                self.file, self.height
            )));
        }
        Ok(rows)
    }

    /// Pixel size of one cell of `texture`.
    pub fn cell_size(&self, texture: &RgbaImage) -> Result<(u32, u32), ConvertError> {
        let rows = self.grid()?;
        let (columns, lines) = (rows[0].len() as u32, rows.len() as u32);
        let (cell_w, cell_h) = (texture.width() / columns, texture.height() / lines);
        if cell_w == 0 || cell_h == 0 {
            return Err(ConvertError::InvalidProvider(format!(
                "{}: {}x{} texture is smaller than its {columns}x{lines} grid",
                self.file,
                texture.width(),
                texture.height()
            )));
        }
        Ok((cell_w, cell_h))
    }

    /// Thresholded mask of every used cell, in grid order. `'\0'` cells are
    /// skipped.
    pub fn cell_masks(&self, texture: &RgbaImage, alpha_threshold: u8) -> Result<Vec<(char, PixelMask)>, ConvertError> {
        let rows = self.grid()?;
        let (cell_w, cell_h) = self.cell_size(texture)?;
        let mut cells = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c == '\0' {
                    continue;
                }
                let cell = imageops::crop_imm(texture, x as u32 * cell_w, y as u32 * cell_h, cell_w, cell_h).to_image();
                cells.push((c, PixelMask::from_rgba(&cell, alpha_threshold)));
            }
        }
        Ok(cells)
    }

    /// Lattice → design-unit transform for cells `cell_height` pixels tall.
    /// One texture pixel renders `height / cell_height` line units, and the
    /// `ascent` row sits on the baseline.
    pub fn transform(&self, cell_height: u32, units_per_pixel: f64) -> Transform {
        let pixel_scale = self.height as f64 / cell_height as f64;
        Transform::new(cell_height, units_per_pixel * pixel_scale).with_baseline(self.ascent as f64 / pixel_scale)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Provider {
    /// Characters that only advance the cursor.
    Space { advances: BTreeMap<char, i32> },
    Bitmap(BitmapProvider),
    /// Splice in the providers of another font.
    Reference { id: ResourceId },
    /// A provider kind this crate does not render (e.g. `ttf`, `unihex`).
    Other { kind: String },
}

/// Where fonts and textures come from.
pub trait ResourceSource {
    /// Providers of the font with this id.
    fn font(&self, id: &ResourceId) -> Result<Vec<Provider>, ConvertError>;
    /// Decoded texture with this id.
    fn texture(&self, id: &ResourceId) -> Result<RgbaImage, ConvertError>;
}

/// Fonts and textures held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    fonts: HashMap<ResourceId, Vec<Provider>>,
    textures: HashMap<ResourceId, RgbaImage>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_font(&mut self, id: ResourceId, providers: Vec<Provider>) {
        self.fonts.insert(id, providers);
    }

    pub fn insert_texture(&mut self, id: ResourceId, texture: RgbaImage) {
        self.textures.insert(id, texture);
    }
}

impl ResourceSource for MemorySource {
    fn font(&self, id: &ResourceId) -> Result<Vec<Provider>, ConvertError> {
        self.fonts
            .get(id)
            .cloned()
            .ok_or_else(|| ConvertError::MissingResource(format!("font {id}")))
    }

    fn texture(&self, id: &ResourceId) -> Result<RgbaImage, ConvertError> {
        self.textures
            .get(id)
            .cloned()
            .ok_or_else(|| ConvertError::MissingResource(format!("texture {id}")))
    }
}

/// Textures read from an unpacked asset tree; fonts registered in memory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
    fonts: MemorySource,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetDir {
            root: root.into(),
            fonts: MemorySource::new(),
        }
    }

    pub fn insert_font(&mut self, id: ResourceId, providers: Vec<Provider>) {
        self.fonts.insert_font(id, providers);
    }
}

impl ResourceSource for AssetDir {
    fn font(&self, id: &ResourceId) -> Result<Vec<Provider>, ConvertError> {
        self.fonts.font(id)
    }

    fn texture(&self, id: &ResourceId) -> Result<RgbaImage, ConvertError> {
        let path = self.root.join(id.asset_path("textures"));
        if !path.is_file() {
            return Err(ConvertError::MissingResource(format!(
                "texture {id} ({})",
                path.display()
            )));
        }
        load_texture(&path)
    }
}

/// Decode an image file to RGBA.
pub fn load_texture(path: &Path) -> Result<RgbaImage, ConvertError> {
    Ok(ImageReader::open(path)
        .map_err(|e| ConvertError::ImageLoad(format!("{}: {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| ConvertError::ImageLoad(format!("{}: {e}", path.display())))?
        .decode()
        .map_err(|e| ConvertError::ImageLoad(format!("{}: {e}", path.display())))?
        .into_rgba8())
}

/// Expand every `Reference` in place, recursively, preserving order.
///
/// A reference to a font that is already being expanded is a
/// `ReferenceCycle`; a reference the source cannot resolve is
/// `MissingResource`.
pub fn flatten(providers: &[Provider], source: &dyn ResourceSource) -> Result<Vec<Provider>, ConvertError> {
    let mut out = Vec::with_capacity(providers.len());
    let mut stack = Vec::new();
    expand(providers, source, &mut stack, &mut out)?;
    Ok(out)
}

fn expand(
    providers: &[Provider],
    source: &dyn ResourceSource,
    stack: &mut Vec<ResourceId>,
    out: &mut Vec<Provider>,
) -> Result<(), ConvertError> {
    for provider in providers {
        match provider {
            Provider::Reference { id } => {
                if stack.contains(id) {
                    let chain: Vec<String> = stack.iter().map(|i| i.to_string()).collect();
                    return Err(ConvertError::ReferenceCycle(format!("{} -> {id}", chain.join(" -> "))));
                }
                debug!("expanding reference {id}");
                let referenced = source.font(id)?;
                stack.push(id.clone());
                expand(&referenced, source, stack, out)?;
                stack.pop();
            }
            other => out.push(other.clone()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        ResourceId::parse(s).unwrap()
    }

    fn space(c: char, w: i32) -> Provider {
        Provider::Space {
            advances: BTreeMap::from([(c, w)]),
        }
    }

    fn reference(s: &str) -> Provider {
        Provider::Reference { id: id(s) }
    }

    #[test]
    fn resource_ids() {
        let full = id("minecraft:font/ascii.png");
        assert_eq!(full.namespace, "minecraft");
        assert_eq!(full.path, "font/ascii.png");
        assert_eq!(id("font/ascii.png"), full);
        assert_eq!(full.to_string(), "minecraft:font/ascii.png");
        assert_eq!(
            full.asset_path("textures"),
            Path::new("assets/minecraft/textures/font/ascii.png")
        );
        for bad in ["", "a:", ":b", "a:b:c"] {
            assert!(ResourceId::parse(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn references_splice_in_place() {
        let mut source = MemorySource::new();
        source.insert_font(id("include/space"), vec![space(' ', 4)]);
        source.insert_font(id("include/nested"), vec![space('a', 1), reference("include/space")]);

        let flat = flatten(
            &[space('x', 2), reference("include/nested"), space('y', 3)],
            &source,
        )
        .unwrap();
        assert_eq!(flat, vec![space('x', 2), space('a', 1), space(' ', 4), space('y', 3)]);
    }

    #[test]
    fn repeated_reference_is_not_a_cycle() {
        let mut source = MemorySource::new();
        source.insert_font(id("include/space"), vec![space(' ', 4)]);
        let flat = flatten(&[reference("include/space"), reference("include/space")], &source).unwrap();
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn cycles_are_detected() {
        let mut source = MemorySource::new();
        source.insert_font(id("a"), vec![reference("b")]);
        source.insert_font(id("b"), vec![space('b', 1), reference("a")]);
        let err = flatten(&[reference("a")], &source).unwrap_err();
        assert!(matches!(err, ConvertError::ReferenceCycle(_)), "{err}");
    }

    #[test]
    fn missing_reference_is_an_error() {
        let err = flatten(&[reference("nowhere")], &MemorySource::new()).unwrap_err();
        assert!(matches!(err, ConvertError::MissingResource(_)));
    }

    #[test]
    fn grid_validation() {
        let provider = |chars: &[&str], height| BitmapProvider {
            file: id("font/test.png"),
            height,
            ascent: 7,
            chars: chars.iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(provider(&["ab", "cd"], 8).grid().unwrap().len(), 2);
        assert!(provider(&[], 8).grid().is_err());
        assert!(provider(&["ab", "c"], 8).grid().is_err());
        assert!(provider(&["ab"], 0).grid().is_err());
    }

    #[test]
    fn cells_are_cropped_in_grid_order() {
        let provider = BitmapProvider {
            file: id("font/test.png"),
            height: 4,
            ascent: 3,
            chars: vec!["a\0".to_string(), "bc".to_string()],
        };
        let texture = RgbaImage::from_fn(4, 4, |x, y| {
            let alpha = if (x, y) == (0, 0) || (x, y) == (3, 3) { 255 } else { 0 };
            image::Rgba([0, 0, 0, alpha])
        });
        assert_eq!(provider.cell_size(&texture).unwrap(), (2, 2));

        let cells = provider.cell_masks(&texture, 127).unwrap();
        let chars: Vec<char> = cells.iter().map(|(c, _)| *c).collect();
        assert_eq!(chars, vec!['a', 'b', 'c']);
        assert!(cells[0].1.get(0, 0));
        assert!(cells[1].1.is_empty());
        assert!(cells[2].1.get(1, 1));

        // Two texture pixels per cell, four line units: each pixel is two
        // line units, and ascent 3 puts the baseline 1.5 pixels down.
        let t = provider.transform(2, 2.0);
        assert_eq!((t.scale, t.baseline, t.shear), (4.0, 1.5, 0.0));
    }

    #[test]
    fn texture_smaller_than_grid_is_rejected() {
        let provider = BitmapProvider {
            file: id("font/test.png"),
            height: 8,
            ascent: 7,
            chars: vec!["abc".to_string()],
        };
        let err = provider.cell_size(&RgbaImage::new(2, 8)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidProvider(_)));
    }

    #[test]
    fn asset_dir_reports_missing_texture() {
        let dir = AssetDir::new("/nonexistent-asset-root");
        let err = dir.texture(&id("font/ascii.png")).unwrap_err();
        assert!(matches!(err, ConvertError::MissingResource(_)));
    }
}
