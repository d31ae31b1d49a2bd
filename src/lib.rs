//! glyphtrace: pixel-font bitmaps → vector glyph outlines.
//!
//! Each character cell of a bitmap font is thresholded into a binary mask,
//! split into filled regions and enclosed holes, traced along pixel edges,
//! reduced to corner points, and mapped into font design units. Fills come
//! out clockwise and holes counter-clockwise, so outlines can go straight
//! into a TrueType-flavoured font source.
//!
//! # Example
//!
//! ```
//! use glyphtrace::{trace_glyph, PixelMask, Style, Transform};
//!
//! let mask = PixelMask::from_rows(&["###", "#.#", "###"]);
//! let transform = Transform::new(mask.height(), 2.0);
//! let glyph = trace_glyph(&mask, &transform, Style::Regular, 0.0);
//! assert_eq!(glyph.paths.len(), 2);
//! assert_eq!(glyph.advance_width, 8.0);
//! ```

#![forbid(unsafe_code)]

pub mod bitmap;
pub mod config;
pub mod error;
pub mod geom;
pub mod glyph;
pub mod glyphset;
pub mod metrics;
pub mod names;
pub mod provider;
pub mod render;
pub mod transform;
pub mod vectorize;

#[cfg(feature = "ufo")]
pub mod ufo;

// Re-export kurbo so downstream users get the same version
// used by Glyph.paths (Vec<kurbo::BezPath>).
pub use kurbo;

pub use bitmap::PixelMask;
pub use config::{ConvertConfig, Style, ITALIC_SHEAR};
pub use error::ConvertError;
pub use glyph::{ContourType, Glyph};
pub use glyphset::{ConvertedFont, FontConverter, GlyphSet, SeenChars};
pub use names::GlyphNames;
pub use provider::{AssetDir, BitmapProvider, MemorySource, Provider, ResourceId, ResourceSource};
pub use transform::Transform;

/// Full pipeline for one mask: style synthesis → regions → rings → glyph.
///
/// Bold styles are traced from the thickened mask; italic styles shear the
/// outline by `italic_shear` without changing the advance width, which is
/// always taken from the traced ink.
pub fn trace_glyph(mask: &PixelMask, transform: &Transform, style: Style, italic_shear: f64) -> Glyph {
    // Bold keeps the caller's baseline rather than one derived from the
    // taller bold canvas, so regular and bold glyphs share a baseline
    // instead of bold sitting one pixel higher.
    let source = if style.is_bold() {
        transform::embolden(mask)
    } else {
        mask.clone()
    };
    let transform = if style.is_italic() {
        transform.with_shear(italic_shear)
    } else {
        *transform
    };

    let outline = vectorize::vectorize(&source);
    let advance_width = metrics::advance_from_ink(outline.right(), transform.scale);
    glyph::assemble(&outline.fills, &outline.holes, &transform, advance_width)
}

/// Convenience: convert a font's providers with a fresh converter.
pub fn convert_font(
    name: &str,
    providers: &[Provider],
    source: &dyn ResourceSource,
    config: &ConvertConfig,
) -> Result<ConvertedFont, ConvertError> {
    FontConverter::new(source, config).convert(name, providers)
}
