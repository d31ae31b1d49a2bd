use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use glyphtrace::provider::load_texture;
use glyphtrace::render::{compare, rasterize};
use glyphtrace::transform::embolden;
use glyphtrace::{
    BitmapProvider, ConvertConfig, ConvertedFont, FontConverter, GlyphNames, MemorySource, Provider, ResourceId,
    Style,
};
use log::{info, warn};

#[derive(Parser)]
#[command(name = "glyphtrace", about = "Bitmap font sheet to vector font sources")]
struct Cli {
    /// Glyph sheet image (PNG)
    #[arg(short, long)]
    texture: PathBuf,

    /// Text file with one line of characters per row of cells
    #[arg(short, long)]
    chars: PathBuf,

    /// Rendered height of one cell, in line units
    #[arg(long, default_value = "8")]
    height: i32,

    /// Rows from the cell top down to the baseline, in line units
    #[arg(long, default_value = "7")]
    ascent: i32,

    /// Spacing-only character, e.g. `--space " =4"` (repeatable)
    #[arg(long, value_parser = parse_space)]
    space: Vec<(char, i32)>,

    /// Styles to produce
    #[arg(long, value_delimiter = ',', default_value = "regular,bold")]
    styles: Vec<Style>,

    /// AGLFN glyph list for glyph names (generic uniXXXX names otherwise)
    #[arg(long)]
    aglfn: Option<PathBuf>,

    /// Design units per line unit
    #[arg(long, default_value = "2.0")]
    units_per_pixel: f64,

    /// Family name, also the output file prefix
    #[arg(long, default_value = "Pixel")]
    family: String,

    /// Directory for `<family>-<style>.ufo` outputs
    #[arg(short, long)]
    output: PathBuf,

    /// Re-rasterize every upright glyph and report mismatches
    #[arg(long)]
    verify: bool,
}

fn parse_space(s: &str) -> Result<(char, i32), String> {
    let (c, width) = s.rsplit_once('=').ok_or("expected C=WIDTH")?;
    let mut chars = c.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(format!("expected a single character, got {c:?}"));
    };
    let width = width.parse().map_err(|e| format!("bad width {width:?}: {e}"))?;
    Ok((c, width))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = ConvertConfig {
        units_per_pixel: cli.units_per_pixel,
        styles: cli.styles.clone(),
        ..ConvertConfig::default()
    };
    let names = match &cli.aglfn {
        Some(path) => GlyphNames::parse_aglfn(&std::fs::read_to_string(path)?)?,
        None => GlyphNames::default(),
    };

    let file = ResourceId::parse("font/sheet.png")?;
    let bitmap = BitmapProvider {
        file: file.clone(),
        height: cli.height,
        ascent: cli.ascent,
        chars: std::fs::read_to_string(&cli.chars)?
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    };

    let mut source = MemorySource::new();
    source.insert_texture(file, load_texture(&cli.texture)?);

    let mut providers = Vec::new();
    if !cli.space.is_empty() {
        let advances: BTreeMap<char, i32> = cli.space.iter().copied().collect();
        providers.push(Provider::Space { advances });
    }
    providers.push(Provider::Bitmap(bitmap.clone()));

    eprintln!();
    eprintln!("  glyphtrace \u{00b7} {}", cli.family);
    eprintln!();

    let font = FontConverter::new(&source, &config).convert(&cli.family, &providers)?;

    std::fs::create_dir_all(&cli.output)?;
    for set in &font.styles {
        let path = cli.output.join(format!("{}-{}.ufo", cli.family, set.style));
        glyphtrace::ufo::write_font(&cli.family, set, &names, &config, &path)?;
        let m = set.metrics();
        eprintln!(
            "  {:<12} {} glyphs \u{00b7} ascender {} \u{00b7} descender {} \u{2192} {}",
            set.style.name(),
            set.len(),
            m.max_top,
            m.min_bottom,
            path.display()
        );
    }

    if cli.verify {
        let texture = load_texture(&cli.texture)?;
        let mismatches = verify(&font, &bitmap, &texture, &config)?;
        if mismatches == 0 {
            eprintln!("  Verify       all upright glyphs match their cells");
        } else {
            eprintln!("  Verify       {mismatches} mismatched glyphs");
        }
    }
    eprintln!();

    Ok(())
}

/// Rasterize each upright glyph back onto its cell and count the ones that
/// differ from the source mask.
fn verify(
    font: &ConvertedFont,
    bitmap: &BitmapProvider,
    texture: &image::RgbaImage,
    config: &ConvertConfig,
) -> Result<usize, glyphtrace::ConvertError> {
    let (_, cell_h) = bitmap.cell_size(texture)?;
    let transform = bitmap.transform(cell_h, config.units_per_pixel);
    let cells = bitmap.cell_masks(texture, config.alpha_threshold)?;

    let mut mismatches = 0;
    for set in font.styles.iter().filter(|set| !set.style.is_italic()) {
        for (c, mask) in &cells {
            let Some(glyph) = set.get(*c) else { continue };
            // Claimed by an earlier spacing provider.
            if glyph.is_empty() && !mask.is_empty() {
                continue;
            }
            let expected = if set.style.is_bold() { embolden(mask) } else { mask.clone() };
            let rendered = rasterize(glyph, &transform, expected.width(), expected.height());
            let diff = compare(&rendered, &expected);
            if !diff.is_exact() {
                warn!("{} {c:?}: IoU {:.1}%", set.style, diff.iou * 100.0);
                mismatches += 1;
            }
        }
    }
    info!("verified {} cells", cells.len());
    Ok(mismatches)
}
