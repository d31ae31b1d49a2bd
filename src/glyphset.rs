//! Per-style glyph sets built from a font's providers.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::bitmap::PixelMask;
use crate::config::{ConvertConfig, Style};
use crate::error::ConvertError;
use crate::glyph::Glyph;
use crate::metrics::{advance_from_spacing, StyleMetrics};
use crate::provider::{flatten, BitmapProvider, Provider, ResourceSource};
use crate::transform::{fallback_mask, Transform, FALLBACK_ASCENT, FALLBACK_HEIGHT};
use crate::trace_glyph;

/// Characters already defined by an earlier provider. The first provider
/// to claim a character owns it in every style.
#[derive(Debug, Clone, Default)]
pub struct SeenChars {
    chars: HashSet<char>,
}

impl SeenChars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `c` was unclaimed and is now claimed.
    pub fn claim(&mut self, c: char) -> bool {
        self.chars.insert(c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// All glyphs of one style.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    pub style: Style,
    /// Drawn for characters the font does not define.
    pub notdef: Glyph,
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphSet {
    fn new(style: Style, notdef: Glyph) -> Self {
        GlyphSet {
            style,
            notdef,
            glyphs: BTreeMap::new(),
        }
    }

    /// Insert unless `c` is already present.
    fn insert(&mut self, c: char, glyph: Glyph) {
        self.glyphs.entry(c).or_insert(glyph);
    }

    pub fn get(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    /// Glyphs in codepoint order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> {
        self.glyphs.iter().map(|(&c, g)| (c, g))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Extents over `.notdef` and every glyph.
    pub fn metrics(&self) -> StyleMetrics {
        StyleMetrics::from_glyphs(std::iter::once(&self.notdef).chain(self.glyphs.values()))
    }
}

/// One converted font: a glyph set per configured style.
#[derive(Debug, Clone)]
pub struct ConvertedFont {
    pub name: String,
    pub styles: Vec<GlyphSet>,
}

impl ConvertedFont {
    pub fn style(&self, style: Style) -> Option<&GlyphSet> {
        self.styles.iter().find(|set| set.style == style)
    }
}

/// Turns provider lists into glyph sets.
pub struct FontConverter<'a> {
    source: &'a dyn ResourceSource,
    config: &'a ConvertConfig,
}

impl<'a> FontConverter<'a> {
    pub fn new(source: &'a dyn ResourceSource, config: &'a ConvertConfig) -> Self {
        FontConverter { source, config }
    }

    /// Convert one font. Reference providers are flattened first; a missing
    /// or cyclic reference fails this font only.
    pub fn convert(&self, name: &str, providers: &[Provider]) -> Result<ConvertedFont, ConvertError> {
        let providers = flatten(providers, self.source)?;
        debug!("{name}: {} providers after flattening", providers.len());

        let mut sets: Vec<GlyphSet> = self
            .config
            .styles
            .iter()
            .map(|&style| GlyphSet::new(style, self.notdef(style)))
            .collect();
        let mut seen = SeenChars::new();

        for provider in &providers {
            match provider {
                Provider::Space { advances } => self.add_spaces(advances, &mut seen, &mut sets),
                Provider::Bitmap(bitmap) => self.add_bitmap(bitmap, &mut seen, &mut sets)?,
                Provider::Other { kind } => warn!("{name}: skipping unsupported provider {kind:?}"),
                Provider::Reference { id } => warn!("{name}: unexpanded reference {id}"),
            }
        }

        for set in &sets {
            let m = set.metrics();
            info!(
                "{name}-{}: {} glyphs, right {} top {} bottom {}",
                set.style,
                set.len(),
                m.max_right,
                m.max_top,
                m.min_bottom
            );
        }

        Ok(ConvertedFont {
            name: name.to_string(),
            styles: sets,
        })
    }

    fn notdef(&self, style: Style) -> Glyph {
        let transform = Transform::new(FALLBACK_HEIGHT, self.config.units_per_pixel)
            .with_baseline(FALLBACK_ASCENT as f64);
        trace_glyph(&fallback_mask(), &transform, style, self.config.italic_shear)
    }

    fn add_spaces(&self, advances: &BTreeMap<char, i32>, seen: &mut SeenChars, sets: &mut [GlyphSet]) {
        debug!("space provider: {} characters", advances.len());
        for (&c, &width) in advances {
            if !seen.claim(c) {
                continue;
            }
            for set in sets.iter_mut() {
                let advance = advance_from_spacing(width, self.config.units_per_pixel, set.style.is_bold());
                set.insert(c, Glyph::empty(advance));
            }
        }
    }

    fn add_bitmap(
        &self,
        provider: &BitmapProvider,
        seen: &mut SeenChars,
        sets: &mut [GlyphSet],
    ) -> Result<(), ConvertError> {
        let texture = self.source.texture(&provider.file)?;
        let (cell_w, cell_h) = provider.cell_size(&texture)?;
        debug!("bitmap provider {}: cells of {}x{} px", provider.file, cell_w, cell_h);

        // One transform for every style: bold cells are traced on a canvas
        // one row taller, but must not be placed by that canvas's height.
        let transform = provider.transform(cell_h, self.config.units_per_pixel);
        let cells: Vec<(char, PixelMask)> = provider
            .cell_masks(&texture, self.config.alpha_threshold)?
            .into_iter()
            .filter(|(c, _)| seen.claim(*c))
            .collect();

        let styles: Vec<Style> = sets.iter().map(|set| set.style).collect();
        let shear = self.config.italic_shear;
        let traced: Vec<(char, Vec<Glyph>)> = cells
            .par_iter()
            .map(|(c, mask)| {
                let glyphs = styles
                    .iter()
                    .map(|&style| trace_glyph(mask, &transform, style, shear))
                    .collect();
                (*c, glyphs)
            })
            .collect();

        for (c, glyphs) in traced {
            for (set, glyph) in sets.iter_mut().zip(glyphs) {
                set.insert(c, glyph);
            }
        }
        Ok(())
    }
}
