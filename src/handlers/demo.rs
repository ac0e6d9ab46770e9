//! Demo endpoints: one per image operation.
//!
//! All accept `multipart/form-data`. Required fields failing to decode
//! surface as HTTP 400 through the typed multipart extractor; malformed
//! *optional* fields fall back to defaults instead of erroring.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use axum_typed_multipart::{TryFromMultipart, TypedMultipart};
use serde::Serialize;

use crate::constants::{DEFAULT_CONVERT_QUALITY, DEFAULT_JPEG_QUALITY};
use crate::error::AppError;
use crate::imaging::{
    BlendMode, FitMode, Metadata, OutputFormat, QuarterTurn,
};
use crate::params::{build_placement, build_text_options, clamp_opacity, TextFields};
use crate::server::AppState;

use super::{decode_upload, image_response};

// === POST /demo/text ===

#[derive(TryFromMultipart)]
pub struct TextForm {
    // Required
    pub text: String,
    pub image: Bytes,

    // Font settings
    pub font: Option<String>,
    #[form_data(field_name = "fontUrl")]
    pub font_url: Option<String>,
    #[form_data(field_name = "fontSize")]
    pub font_size: Option<u32>,
    pub dpi: Option<u32>,

    // Color settings
    pub color: Option<String>,
    pub opacity: Option<f64>,

    // Stroke/outline settings
    #[form_data(field_name = "strokeWidth")]
    pub stroke_width: Option<f64>,
    #[form_data(field_name = "strokeColor")]
    pub stroke_color: Option<String>,
    #[form_data(field_name = "strokeOpacity")]
    pub stroke_opacity: Option<f64>,

    // Shadow settings
    #[form_data(field_name = "shadowOffsetX")]
    pub shadow_offset_x: Option<f64>,
    #[form_data(field_name = "shadowOffsetY")]
    pub shadow_offset_y: Option<f64>,
    #[form_data(field_name = "shadowColor")]
    pub shadow_color: Option<String>,
    #[form_data(field_name = "shadowOpacity")]
    pub shadow_opacity: Option<f64>,

    // Typography settings
    pub kerning: Option<f64>,
    #[form_data(field_name = "lineSpacing")]
    pub line_spacing: Option<f64>,
    pub align: Option<String>,
    #[form_data(field_name = "textWidth")]
    pub text_width: Option<u32>,
    #[form_data(field_name = "textHeight")]
    pub text_height: Option<u32>,

    // Transform settings
    pub rotation: Option<f64>,
    pub antialiasing: Option<String>,

    // Position settings
    pub position: Option<String>,
    pub gravity: Option<String>,
    pub x: Option<i64>,
    pub y: Option<i64>,
}

pub async fn text_overlay(
    State(state): State<AppState>,
    TypedMultipart(form): TypedMultipart<TextForm>,
) -> Result<Response, AppError> {
    tracing::info!(size_bytes = form.image.len(), "Received text overlay request");

    let picture = decode_upload("image", &form.image)?;
    tracing::info!(
        width = picture.width(),
        height = picture.height(),
        "Image loaded"
    );

    let font = state
        .fonts
        .resolve_and_load(form.font.as_deref(), form.font_url.as_deref())
        .await?;

    let options = build_text_options(&TextFields {
        font_size: form.font_size,
        dpi: form.dpi,
        color: form.color.as_deref(),
        opacity: form.opacity,
        stroke_width: form.stroke_width,
        stroke_color: form.stroke_color.as_deref(),
        stroke_opacity: form.stroke_opacity,
        shadow_offset_x: form.shadow_offset_x,
        shadow_offset_y: form.shadow_offset_y,
        shadow_color: form.shadow_color.as_deref(),
        shadow_opacity: form.shadow_opacity,
        kerning: form.kerning,
        line_spacing: form.line_spacing,
        align: form.align.as_deref(),
        text_width: form.text_width,
        text_height: form.text_height,
        rotation: form.rotation,
        antialiasing: form.antialiasing.as_deref(),
    });

    let placement = build_placement(
        form.position.as_deref(),
        form.gravity.as_deref(),
        form.x,
        form.y,
        picture.width(),
        picture.height(),
    );

    let with_text = picture.draw_text(&form.text, placement, &options, &font)?;

    Ok(image_response(with_text.encode(OutputFormat::Png, DEFAULT_CONVERT_QUALITY)?))
}

// === POST /demo/resize ===

#[derive(TryFromMultipart)]
pub struct ResizeForm {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Option<String>,
    pub image: Bytes,
}

pub async fn resize_image(
    TypedMultipart(form): TypedMultipart<ResizeForm>,
) -> Result<Response, AppError> {
    let picture = decode_upload("image", &form.image)?;

    let fit = FitMode::parse_lenient(form.fit.as_deref());
    let resized = picture.resize(form.width, form.height, fit)?;

    tracing::info!(
        width = resized.width(),
        height = resized.height(),
        ?fit,
        "Image resized"
    );

    Ok(image_response(resized.encode(OutputFormat::Jpeg, DEFAULT_JPEG_QUALITY)?))
}

// === POST /demo/convert ===

#[derive(TryFromMultipart)]
pub struct ConvertForm {
    pub format: String,
    pub quality: Option<u8>,
    pub image: Bytes,
}

pub async fn convert_format(
    TypedMultipart(form): TypedMultipart<ConvertForm>,
) -> Result<Response, AppError> {
    let picture = decode_upload("image", &form.image)?;

    let format: OutputFormat = form.format.parse()?;
    let quality = form.quality.unwrap_or(DEFAULT_CONVERT_QUALITY);

    Ok(image_response(picture.encode(format, quality)?))
}

// === POST /demo/rotate ===

#[derive(TryFromMultipart)]
pub struct RotateForm {
    pub angle: i64,
    pub image: Bytes,
}

pub async fn rotate_image(
    TypedMultipart(form): TypedMultipart<RotateForm>,
) -> Result<Response, AppError> {
    let picture = decode_upload("image", &form.image)?;

    // Only quarter turns rotate; any other angle passes through unrotated
    let rotated = match QuarterTurn::from_angle(form.angle) {
        Some(turn) => picture.rotate(turn),
        None => picture,
    };

    Ok(image_response(rotated.encode(OutputFormat::Jpeg, DEFAULT_JPEG_QUALITY)?))
}

// === POST /demo/metadata ===

#[derive(TryFromMultipart)]
pub struct MetadataForm {
    pub image: Bytes,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub has_alpha: bool,
    pub format: Option<String>,
}

pub async fn metadata(
    TypedMultipart(form): TypedMultipart<MetadataForm>,
) -> Result<Json<MetadataResponse>, AppError> {
    if form.image.is_empty() {
        return Err(AppError::bad_request("Failed to read image data"));
    }

    let meta = Metadata::probe(&form.image)?;

    Ok(Json(MetadataResponse {
        width: meta.width,
        height: meta.height,
        channels: meta.channels,
        has_alpha: meta.has_alpha,
        format: meta.format,
    }))
}

// === POST /demo/composite ===

#[derive(TryFromMultipart)]
pub struct CompositeForm {
    #[form_data(field_name = "baseImage")]
    pub base_image: Bytes,
    #[form_data(field_name = "overlayImage")]
    pub overlay_image: Bytes,
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub opacity: Option<f64>,
    pub mode: Option<String>,
}

pub async fn composite_image(
    TypedMultipart(form): TypedMultipart<CompositeForm>,
) -> Result<Response, AppError> {
    let base = decode_upload("base image", &form.base_image)?;
    let overlay = decode_upload("overlay image", &form.overlay_image)?;

    let mode = BlendMode::parse_lenient(form.mode.as_deref());
    let opacity = form.opacity.map(clamp_opacity).unwrap_or(1.0) as f32;

    let composited = base.composite(
        &overlay,
        form.x.unwrap_or(0),
        form.y.unwrap_or(0),
        mode,
        opacity,
    );

    Ok(image_response(composited.encode(OutputFormat::Png, DEFAULT_CONVERT_QUALITY)?))
}
