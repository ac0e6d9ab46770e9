//! Text option building.
//!
//! Assembles the loose text-overlay form fields into the imaging adapter's
//! [`TextOptions`], applying the endpoint defaults. All color/enum fallbacks
//! happen here, visibly, so the parsers themselves stay policy-free.

use crate::constants::{DEFAULT_DPI, DEFAULT_FONT_SIZE};
use crate::imaging::{Placement, Rgba, Shadow, Stroke, TextAlign, TextOptions};

use super::color::resolve_color;
use super::geometry::{parse_align, parse_gravity, parse_position};

/// Raw text-styling form fields, as received from the multipart body.
#[derive(Debug, Default)]
pub struct TextFields<'a> {
    pub font_size: Option<u32>,
    pub dpi: Option<u32>,
    pub color: Option<&'a str>,
    pub opacity: Option<f64>,
    pub stroke_width: Option<f64>,
    pub stroke_color: Option<&'a str>,
    pub stroke_opacity: Option<f64>,
    pub shadow_offset_x: Option<f64>,
    pub shadow_offset_y: Option<f64>,
    pub shadow_color: Option<&'a str>,
    pub shadow_opacity: Option<f64>,
    pub kerning: Option<f64>,
    pub line_spacing: Option<f64>,
    pub align: Option<&'a str>,
    pub text_width: Option<u32>,
    pub text_height: Option<u32>,
    pub rotation: Option<f64>,
    pub antialiasing: Option<&'a str>,
}

/// Default shadow color: half-transparent black.
fn default_shadow_color() -> Rgba {
    Rgba::new(0, 0, 0, 128)
}

/// Build [`TextOptions`] from form fields, applying endpoint defaults.
pub fn build_text_options(fields: &TextFields<'_>) -> TextOptions {
    // Stroke only applies when a width was supplied
    let stroke = fields.stroke_width.map(|width| Stroke {
        color: resolve_color(fields.stroke_color, fields.stroke_opacity, Rgba::black()),
        width: width.max(0.0) as f32,
    });

    // Shadow only applies when both offsets were supplied
    let shadow = match (fields.shadow_offset_x, fields.shadow_offset_y) {
        (Some(dx), Some(dy)) => Some(Shadow {
            dx: dx as f32,
            dy: dy as f32,
            color: resolve_color(fields.shadow_color, fields.shadow_opacity, default_shadow_color()),
        }),
        _ => None,
    };

    TextOptions {
        font_size: fields.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        dpi: fields.dpi.unwrap_or(DEFAULT_DPI),
        fill: resolve_color(fields.color, fields.opacity, Rgba::white()),
        stroke,
        shadow,
        kerning: fields.kerning.unwrap_or(0.0) as f32,
        line_spacing: fields.line_spacing.unwrap_or(0.0) as f32,
        align: parse_align(fields.align).unwrap_or_default(),
        wrap_width: fields.text_width,
        wrap_height: fields.text_height,
        rotation: fields.rotation.map(|r| r as f32),
        antialias: !matches!(
            fields.antialiasing.map(|s| s.trim().to_lowercase()).as_deref(),
            Some("false")
        ),
    }
}

/// Resolve a placement from the position/gravity/coordinate fields.
///
/// Priority: named position, then gravity, then explicit coordinates with the
/// image center as the default for either missing axis.
pub fn build_placement(
    position: Option<&str>,
    gravity: Option<&str>,
    x: Option<i64>,
    y: Option<i64>,
    image_width: u32,
    image_height: u32,
) -> Placement {
    if let Some(named) = parse_position(position) {
        return Placement::Position(named);
    }

    if let Some(gravity) = parse_gravity(gravity) {
        return Placement::Gravity(gravity);
    }

    Placement::At {
        x: x.unwrap_or(image_width as i64 / 2),
        y: y.unwrap_or(image_height as i64 / 2),
    }
}
