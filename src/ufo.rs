//! Write glyph sets as UFO font sources.

use std::path::Path;

use kurbo::{BezPath, PathEl};
use log::info;
use norad::fontinfo::NonNegativeIntegerOrFloat;
use norad::{Contour, ContourPoint, Font, PointType};

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::glyph::Glyph;
use crate::glyphset::GlyphSet;
use crate::names::GlyphNames;

/// Convert a `Glyph` to a `norad::Glyph`.
pub fn to_glyph(name: &str, glyph: &Glyph, codepoint: Option<char>) -> Result<norad::Glyph, ConvertError> {
    let mut out = norad::Glyph::new(name);
    out.width = glyph.advance_width;
    if let Some(c) = codepoint {
        out.codepoints.insert(c);
    }
    for path in &glyph.paths {
        out.contours.push(to_contour(path)?);
    }
    Ok(out)
}

/// Convert a closed line `BezPath` to a `norad::Contour`.
///
/// Every vertex becomes a `line` point. UFO contours are cyclic, so the
/// closing segment back to the first point is implicit.
pub fn to_contour(path: &BezPath) -> Result<Contour, ConvertError> {
    let elements = path.elements();
    let first = match elements.first() {
        Some(PathEl::MoveTo(p)) => *p,
        Some(_) => return Err(ConvertError::InvalidPath("path must start with MoveTo".into())),
        None => return Err(ConvertError::EmptyContour),
    };

    let mut points = vec![line_point(first)];
    for el in &elements[1..] {
        match *el {
            PathEl::LineTo(p) => points.push(line_point(p)),
            PathEl::ClosePath => {}
            PathEl::MoveTo(_) => return Err(ConvertError::InvalidPath("unexpected MoveTo mid-path".into())),
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {
                return Err(ConvertError::InvalidPath("outline contours are straight lines only".into()))
            }
        }
    }

    // An explicit return to the start would double the first point.
    if points.len() > 1 && points.last().is_some_and(|p| p.x == first.x && p.y == first.y) {
        points.pop();
    }

    Ok(Contour::new(points, None, None))
}

fn line_point(p: kurbo::Point) -> ContourPoint {
    ContourPoint::new(p.x, p.y, PointType::Line, false, None, None, None)
}

/// Build a UFO for one style: `.notdef`, `.null`, then every glyph under its
/// listed or generic name.
pub fn build_font(
    family: &str,
    set: &GlyphSet,
    names: &GlyphNames,
    config: &ConvertConfig,
) -> Result<Font, ConvertError> {
    let mut font = Font::new();
    let metrics = set.metrics();

    let info = &mut font.font_info;
    info.family_name = Some(family.to_string());
    info.style_name = Some(style_label(set.style.name()));
    info.units_per_em = NonNegativeIntegerOrFloat::new(config.units_per_em);
    info.ascender = Some(metrics.max_top);
    info.descender = Some(metrics.min_bottom);

    let layer = font.default_layer_mut();
    layer.insert_glyph(to_glyph(".notdef", &set.notdef, None)?);
    layer.insert_glyph(to_glyph(".null", &Glyph::empty(0.0), None)?);
    for (c, glyph) in set.iter() {
        layer.insert_glyph(to_glyph(&names.name(c), glyph, Some(c))?);
    }

    Ok(font)
}

/// Build and save one style's UFO at `path`.
pub fn write_font(
    family: &str,
    set: &GlyphSet,
    names: &GlyphNames,
    config: &ConvertConfig,
    path: &Path,
) -> Result<(), ConvertError> {
    let font = build_font(family, set, names, config)?;
    font.save(path)?;
    info!("wrote {} ({} glyphs)", path.display(), set.len() + 2);
    Ok(())
}

/// `"bold-italic"` → `"Bold Italic"`.
fn style_label(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::PixelMask;
    use crate::config::Style;
    use crate::glyphset::FontConverter;
    use crate::provider::{MemorySource, Provider};
    use crate::transform::Transform;
    use crate::trace_glyph;

    fn ring() -> Glyph {
        let mask = PixelMask::from_rows(&["###", "#.#", "###"]);
        trace_glyph(&mask, &Transform::new(3, 2.0), Style::Regular, 0.0)
    }

    #[test]
    fn contours_are_cyclic_line_points() {
        let glyph = to_glyph("o", &ring(), Some('o')).unwrap();
        assert_eq!(glyph.width, 8.0);
        assert!(glyph.codepoints.contains('o'));
        assert_eq!(glyph.contours.len(), 2);
        for contour in &glyph.contours {
            assert_eq!(contour.points.len(), 4);
            assert!(contour.points.iter().all(|p| p.typ == PointType::Line));
        }
        let outer = &glyph.contours[0].points;
        // Simplification drops the trace start (1, 0); the ring begins at
        // the top-right corner.
        assert_eq!((outer[0].x, outer[0].y), (6.0, 6.0));
    }

    #[test]
    fn explicit_closing_point_is_dropped() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 2.0));
        path.line_to((2.0, 2.0));
        path.line_to((0.0, 0.0));
        path.close_path();
        assert_eq!(to_contour(&path).unwrap().points.len(), 3);
    }

    #[test]
    fn rejects_curves_and_empty_paths() {
        assert!(matches!(to_contour(&BezPath::new()), Err(ConvertError::EmptyContour)));
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((1.0, 1.0), (2.0, 0.0));
        assert!(matches!(to_contour(&path), Err(ConvertError::InvalidPath(_))));
    }

    #[test]
    fn font_has_special_glyphs_and_metrics() {
        let source = MemorySource::new();
        let config = ConvertConfig {
            styles: vec![Style::BoldItalic],
            ..ConvertConfig::default()
        };
        let providers = [Provider::Space {
            advances: [(' ', 4)].into_iter().collect(),
        }];
        let converted = FontConverter::new(&source, &config).convert("test", &providers).unwrap();
        let set = &converted.styles[0];
        let names = GlyphNames::parse_aglfn("0020;space;SPACE").unwrap();

        let font = build_font("Pixel", set, &names, &config).unwrap();
        let layer = font.default_layer();
        assert_eq!(layer.len(), 3);
        assert!(layer.get_glyph(".notdef").is_some_and(|g| !g.contours.is_empty()));
        assert!(layer.get_glyph(".null").is_some_and(|g| g.width == 0.0));
        assert_eq!(layer.get_glyph("space").map(|g| g.width), Some(10.0));
        assert_eq!(font.font_info.style_name.as_deref(), Some("Bold Italic"));
        assert_eq!(font.font_info.ascender, Some(set.metrics().max_top));
    }
}
