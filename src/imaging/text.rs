//! Text rendering.
//!
//! Renders styled text to a transparent RGBA layer that the picture facade
//! composites onto the target image. Supports fill/stroke/shadow colors,
//! letter spacing, line spacing, word wrapping with alignment, rotation, and
//! an antialiasing toggle.

use ab_glyph::{Font, PxScale, PxScaleFont, ScaleFont};
use image::{Rgba as ImageRgba, RgbaImage};

use super::color::Rgba;
use super::compose::{blend_pixel, BlendMode};
use super::error::ImageError;
use crate::constants::{DEFAULT_DPI, DEFAULT_FONT_SIZE};

/// Horizontal alignment of wrapped lines within the text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Stroke (outline) style.
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// Drop shadow style.
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub dx: f32,
    pub dy: f32,
    pub color: Rgba,
}

/// Options for text rendering.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Font size in points.
    pub font_size: u32,
    /// Rendering DPI; the pixel size is `font_size * dpi / 72`.
    pub dpi: u32,
    /// Fill color.
    pub fill: Rgba,
    /// Optional outline drawn under the fill.
    pub stroke: Option<Stroke>,
    /// Optional drop shadow drawn under everything else.
    pub shadow: Option<Shadow>,
    /// Extra letter spacing in pixels, added to the font's own kerning.
    pub kerning: f32,
    /// Extra spacing between lines in pixels.
    pub line_spacing: f32,
    /// Alignment of lines within the block.
    pub align: TextAlign,
    /// Wrap lines to this width in pixels.
    pub wrap_width: Option<u32>,
    /// Drop lines that would exceed this height in pixels.
    pub wrap_height: Option<u32>,
    /// Rotation of the rendered block in degrees (clockwise).
    pub rotation: Option<f32>,
    /// Antialiased glyph edges. When off, coverage is thresholded.
    pub antialias: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            dpi: DEFAULT_DPI,
            fill: Rgba::white(),
            stroke: None,
            shadow: None,
            kerning: 0.0,
            line_spacing: 0.0,
            align: TextAlign::Left,
            wrap_width: None,
            wrap_height: None,
            rotation: None,
            antialias: true,
        }
    }
}

/// Render text to a transparent RGBA layer.
pub fn render_text<F: Font>(
    text: &str,
    font: &F,
    options: &TextOptions,
) -> Result<RgbaImage, ImageError> {
    if text.is_empty() {
        return Err(ImageError::render_failed("Cannot render empty text"));
    }

    let px_size = options.font_size as f32 * options.dpi as f32 / 72.0;
    if px_size <= 0.0 {
        return Err(ImageError::render_failed("Font size must be positive"));
    }
    let scale = PxScale::from(px_size);
    let scaled = font.as_scaled(scale);

    let lines = layout_lines(text, &scaled, options);
    let widths: Vec<f32> = lines
        .iter()
        .map(|line| line_width(&scaled, line, options.kerning))
        .collect();

    let block_width = widths.iter().cloned().fold(0.0f32, f32::max);
    let line_advance = scaled.height() + options.line_spacing;
    let block_height =
        scaled.height() + (lines.len().saturating_sub(1)) as f32 * line_advance;

    // Padding keeps stroke and shadow inside the canvas
    let stroke_pad = options.stroke.map(|s| s.width.ceil()).unwrap_or(0.0);
    let (shadow_dx, shadow_dy) = options
        .shadow
        .map(|s| (s.dx, s.dy))
        .unwrap_or((0.0, 0.0));
    let pad = 2.0 + stroke_pad;
    let left_pad = pad + (-shadow_dx).max(0.0);
    let top_pad = pad + (-shadow_dy).max(0.0);
    let right_pad = pad + shadow_dx.max(0.0);
    let bottom_pad = pad + shadow_dy.max(0.0);

    let canvas_width = ((block_width + left_pad + right_pad).ceil() as u32).max(1);
    let canvas_height = ((block_height + top_pad + bottom_pad).ceil() as u32).max(1);

    let mut canvas = RgbaImage::new(canvas_width, canvas_height);

    let origin = (left_pad, top_pad);

    // Shadow, then stroke, then fill: later passes sit on top
    if let Some(shadow) = options.shadow {
        draw_pass(
            &mut canvas,
            &lines,
            &widths,
            block_width,
            &scaled,
            font,
            options,
            (origin.0 + shadow.dx, origin.1 + shadow.dy),
            shadow.color,
        );
    }

    if let Some(stroke) = options.stroke {
        for (dx, dy) in stroke_offsets(stroke.width) {
            draw_pass(
                &mut canvas,
                &lines,
                &widths,
                block_width,
                &scaled,
                font,
                options,
                (origin.0 + dx, origin.1 + dy),
                stroke.color,
            );
        }
    }

    draw_pass(
        &mut canvas,
        &lines,
        &widths,
        block_width,
        &scaled,
        font,
        options,
        origin,
        options.fill,
    );

    match options.rotation {
        Some(degrees) if degrees.rem_euclid(360.0) != 0.0 => Ok(rotate_layer(&canvas, degrees)),
        _ => Ok(canvas),
    }
}

/// Split input into rendered lines: explicit newlines first, then greedy
/// word wrapping against `wrap_width`, then the `wrap_height` cut.
fn layout_lines<F: Font>(
    text: &str,
    scaled: &PxScaleFont<&F>,
    options: &TextOptions,
) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        match options.wrap_width {
            Some(width) if width > 0 => wrap_line(raw_line, scaled, options.kerning, width as f32, &mut lines),
            _ => lines.push(raw_line.to_string()),
        }
    }

    if let Some(height) = options.wrap_height {
        let line_advance = scaled.height() + options.line_spacing;
        let max_lines = ((height as f32 / line_advance).floor() as usize).max(1);
        lines.truncate(max_lines);
    }

    lines
}

fn wrap_line<F: Font>(
    line: &str,
    scaled: &PxScaleFont<&F>,
    kerning: f32,
    max_width: f32,
    out: &mut Vec<String>,
) {
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if line_width(scaled, &candidate, kerning) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            out.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    out.push(current);
}

/// Advance width of a single line, including kerning and letter spacing.
fn line_width<F: Font>(scaled: &PxScaleFont<&F>, line: &str, kerning: f32) -> f32 {
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in line.chars() {
        let glyph_id = scaled.glyph_id(c);

        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id) + kerning;
        }

        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width
}

/// Offsets approximating a stroke of the given width: eight directions per
/// radius step out to the stroke width.
fn stroke_offsets(width: f32) -> Vec<(f32, f32)> {
    let mut offsets = Vec::new();
    let steps = width.ceil().max(1.0) as i32;

    for step in 1..=steps {
        let r = (step as f32).min(width.max(1.0));
        let diag = r * std::f32::consts::FRAC_1_SQRT_2;
        offsets.extend_from_slice(&[
            (r, 0.0),
            (-r, 0.0),
            (0.0, r),
            (0.0, -r),
            (diag, diag),
            (diag, -diag),
            (-diag, diag),
            (-diag, -diag),
        ]);
    }

    offsets
}

/// Draw all lines once in a single color at the given origin.
#[allow(clippy::too_many_arguments)]
fn draw_pass<F: Font>(
    canvas: &mut RgbaImage,
    lines: &[String],
    widths: &[f32],
    block_width: f32,
    scaled: &PxScaleFont<&F>,
    font: &F,
    options: &TextOptions,
    origin: (f32, f32),
    color: Rgba,
) {
    let line_advance = scaled.height() + options.line_spacing;
    let ascent = scaled.ascent();

    for (index, line) in lines.iter().enumerate() {
        let align_offset = match options.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => (block_width - widths[index]) / 2.0,
            TextAlign::Right => block_width - widths[index],
        };

        let baseline_y = origin.1 + ascent + index as f32 * line_advance;
        draw_line(
            canvas,
            line,
            origin.0 + align_offset,
            baseline_y,
            scaled,
            font,
            options,
            color,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_line<F: Font>(
    canvas: &mut RgbaImage,
    line: &str,
    start_x: f32,
    baseline_y: f32,
    scaled: &PxScaleFont<&F>,
    font: &F,
    options: &TextOptions,
    color: Rgba,
) {
    let canvas_width = canvas.width() as i32;
    let canvas_height = canvas.height() as i32;
    let scale = scaled.scale();

    let mut cursor_x = start_x;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in line.chars() {
        let glyph_id = scaled.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled.kern(prev, glyph_id) + options.kerning;
        }

        let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && y >= 0 && x < canvas_width && y < canvas_height {
                    let coverage = if options.antialias {
                        coverage.clamp(0.0, 1.0)
                    } else if coverage >= 0.5 {
                        1.0
                    } else {
                        0.0
                    };

                    let pixel_alpha = (coverage * color.a as f32) as u8;
                    let pixel = ImageRgba([color.r, color.g, color.b, pixel_alpha]);

                    let existing = canvas.get_pixel(x as u32, y as u32);
                    let blended = blend_pixel(*existing, pixel, BlendMode::Over, 1.0);
                    canvas.put_pixel(x as u32, y as u32, blended);
                }
            });
        }

        cursor_x += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
}

/// Rotate a layer by the specified degrees (clockwise), expanding the canvas
/// to hold the rotated bounding box. Samples with bilinear interpolation.
fn rotate_layer(image: &RgbaImage, degrees: f32) -> RgbaImage {
    let radians = -degrees.to_radians();
    let cos = radians.cos();
    let sin = radians.sin();

    let src_w = image.width() as f32;
    let src_h = image.height() as f32;
    let cx = src_w / 2.0;
    let cy = src_h / 2.0;

    let corners = [
        (-cx, -cy),
        (src_w - cx, -cy),
        (-cx, src_h - cy),
        (src_w - cx, src_h - cy),
    ];

    let rotated: Vec<(f32, f32)> = corners
        .iter()
        .map(|(x, y)| (x * cos - y * sin, x * sin + y * cos))
        .collect();

    let min_x = rotated.iter().map(|(x, _)| *x).fold(f32::INFINITY, f32::min);
    let max_x = rotated
        .iter()
        .map(|(x, _)| *x)
        .fold(f32::NEG_INFINITY, f32::max);
    let min_y = rotated.iter().map(|(_, y)| *y).fold(f32::INFINITY, f32::min);
    let max_y = rotated
        .iter()
        .map(|(_, y)| *y)
        .fold(f32::NEG_INFINITY, f32::max);

    let dst_w = ((max_x - min_x).ceil() as u32).max(1);
    let dst_h = ((max_y - min_y).ceil() as u32).max(1);

    let mut output = RgbaImage::new(dst_w, dst_h);

    let dst_cx = dst_w as f32 / 2.0;
    let dst_cy = dst_h as f32 / 2.0;

    // Inverse rotation for sampling
    let inv_cos = (-radians).cos();
    let inv_sin = (-radians).sin();

    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let rx = dx as f32 - dst_cx;
            let ry = dy as f32 - dst_cy;

            let sx = rx * inv_cos - ry * inv_sin + cx;
            let sy = rx * inv_sin + ry * inv_cos + cy;

            if sx >= 0.0 && sx < src_w - 1.0 && sy >= 0.0 && sy < src_h - 1.0 {
                let x0 = sx.floor() as u32;
                let y0 = sy.floor() as u32;
                let fx = sx - x0 as f32;
                let fy = sy - y0 as f32;

                let p00 = image.get_pixel(x0, y0);
                let p10 = image.get_pixel(x0 + 1, y0);
                let p01 = image.get_pixel(x0, y0 + 1);
                let p11 = image.get_pixel(x0 + 1, y0 + 1);

                let interpolate = |c: usize| -> u8 {
                    let v = p00[c] as f32 * (1.0 - fx) * (1.0 - fy)
                        + p10[c] as f32 * fx * (1.0 - fy)
                        + p01[c] as f32 * (1.0 - fx) * fy
                        + p11[c] as f32 * fx * fy;
                    v.clamp(0.0, 255.0) as u8
                };

                output.put_pixel(
                    dx,
                    dy,
                    ImageRgba([
                        interpolate(0),
                        interpolate(1),
                        interpolate(2),
                        interpolate(3),
                    ]),
                );
            }
        }
    }

    output
}
