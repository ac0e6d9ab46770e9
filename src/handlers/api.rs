//! API endpoints: richer metadata and the combined processing pipeline.

use axum::body::Bytes;
use axum::response::Response;
use axum::Json;
use axum_typed_multipart::{TryFromMultipart, TypedMultipart};
use serde::Serialize;

use crate::constants::DEFAULT_CONVERT_QUALITY;
use crate::error::AppError;
use crate::imaging::{FitMode, Metadata, OutputFormat, QuarterTurn};

use super::{decode_upload, image_response};

// === POST /api/metadata ===

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
    pub format: Option<String>,
    pub space: String,
    pub has_alpha: bool,
    pub orientation: Option<u32>,
    pub density: Option<f64>,
    pub pages: u32,
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
        format: meta.format,
        space: meta.color_space,
        has_alpha: meta.has_alpha,
        orientation: meta.orientation,
        density: meta.density,
        pages: meta.pages,
    }))
}

// === POST /api/images/process ===

#[derive(TryFromMultipart)]
pub struct ProcessForm {
    pub image: Bytes,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Option<String>,
    pub angle: Option<i64>,
    pub format: Option<String>,
    pub quality: Option<u8>,
}

/// Combined pipeline: resize, then rotate, then encode.
///
/// The output format defaults to the source container's format when it is
/// one the encoders support, JPEG otherwise.
pub async fn process(
    TypedMultipart(form): TypedMultipart<ProcessForm>,
) -> Result<Response, AppError> {
    let mut picture = decode_upload("image", &form.image)?;

    if form.width.is_some() || form.height.is_some() {
        let fit = FitMode::parse_lenient(form.fit.as_deref());
        picture = picture.resize(form.width, form.height, fit)?;
    }

    if let Some(turn) = form.angle.and_then(QuarterTurn::from_angle) {
        picture = picture.rotate(turn);
    }

    let format = match form.format.as_deref() {
        Some(raw) => raw.parse()?,
        None => picture.source_output_format().unwrap_or(OutputFormat::Jpeg),
    };
    let quality = form.quality.unwrap_or(DEFAULT_CONVERT_QUALITY);

    tracing::info!(
        width = picture.width(),
        height = picture.height(),
        format = format.as_str(),
        quality,
        "Image processed"
    );

    Ok(image_response(picture.encode(format, quality)?))
}
