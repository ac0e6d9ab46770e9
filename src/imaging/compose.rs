//! Compositing of an overlay onto a base image.
//!
//! Supports three blend modes and an extra opacity applied on top of the
//! overlay's own alpha channel. Offsets may place the overlay partially (or
//! entirely) outside the base; only the visible region is touched.

use image::{Rgba, RgbaImage};

/// Pixel-combination rule for compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Porter-Duff "over" operator.
    #[default]
    Over,
    /// Additive blending, clamped per channel.
    Add,
    /// Multiplicative blending.
    Multiply,
}

impl BlendMode {
    /// Lenient parse: unrecognized or absent input falls back to `Over`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("add") => BlendMode::Add,
            Some("multiply") => BlendMode::Multiply,
            _ => BlendMode::Over,
        }
    }
}

/// Blend an overlay onto the base image at the given offset.
///
/// `opacity` scales the overlay's alpha channel and is clamped to [0, 1].
pub fn composite(
    base: &mut RgbaImage,
    overlay: &RgbaImage,
    x: i64,
    y: i64,
    mode: BlendMode,
    opacity: f32,
) {
    let base_width = base.width() as i64;
    let base_height = base.height() as i64;
    let overlay_width = overlay.width() as i64;
    let overlay_height = overlay.height() as i64;

    // Visible region, clamped to base bounds
    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + overlay_width).min(base_width);
    let y_end = (y + overlay_height).min(base_height);

    let opacity = opacity.clamp(0.0, 1.0);

    for by in y_start..y_end {
        for bx in x_start..x_end {
            let ox = (bx - x) as u32;
            let oy = (by - y) as u32;

            let overlay_pixel = overlay.get_pixel(ox, oy);
            let base_pixel = base.get_pixel(bx as u32, by as u32);

            let blended = blend_pixel(*base_pixel, *overlay_pixel, mode, opacity);
            base.put_pixel(bx as u32, by as u32, blended);
        }
    }
}

/// Blend two pixels with the given mode and additional overlay opacity.
pub fn blend_pixel(background: Rgba<u8>, foreground: Rgba<u8>, mode: BlendMode, opacity: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * opacity;
    let bg_alpha = background[3] as f32 / 255.0;

    match mode {
        BlendMode::Over => {
            // Porter-Duff "over" operator
            let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

            if out_alpha < 0.001 {
                return Rgba([0, 0, 0, 0]);
            }

            let blend_channel = |fg: u8, bg: u8| -> u8 {
                let fg_f = fg as f32 / 255.0;
                let bg_f = bg as f32 / 255.0;
                let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
                (result * 255.0).clamp(0.0, 255.0) as u8
            };

            Rgba([
                blend_channel(foreground[0], background[0]),
                blend_channel(foreground[1], background[1]),
                blend_channel(foreground[2], background[2]),
                (out_alpha * 255.0) as u8,
            ])
        }
        BlendMode::Add => {
            let blend_channel = |fg: u8, bg: u8| -> u8 {
                let added = bg as f32 + fg as f32 * fg_alpha;
                added.clamp(0.0, 255.0) as u8
            };

            Rgba([
                blend_channel(foreground[0], background[0]),
                blend_channel(foreground[1], background[1]),
                blend_channel(foreground[2], background[2]),
                background[3],
            ])
        }
        BlendMode::Multiply => {
            // Interpolate between the base and base*overlay by overlay alpha
            let blend_channel = |fg: u8, bg: u8| -> u8 {
                let fg_f = fg as f32 / 255.0;
                let bg_f = bg as f32 / 255.0;
                let multiplied = bg_f * fg_f;
                let result = bg_f * (1.0 - fg_alpha) + multiplied * fg_alpha;
                (result * 255.0).clamp(0.0, 255.0) as u8
            };

            Rgba([
                blend_channel(foreground[0], background[0]),
                blend_channel(foreground[1], background[1]),
                blend_channel(foreground[2], background[2]),
                background[3],
            ])
        }
    }
}
