//! Certificate generation endpoint.
//!
//! Overlays a name onto the configured certificate template. The template
//! path and font come from the assets configuration injected at startup.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::constants::{CERTIFICATE_FONT_SIZE, DEFAULT_CONVERT_QUALITY};
use crate::error::AppError;
use crate::imaging::{OutputFormat, Picture, Placement, Rgba, Stroke, TextOptions};
use crate::server::AppState;

use super::image_response;

#[derive(Debug, Deserialize)]
pub struct CertificateQuery {
    pub name: String,
}

/// GET /demo/certificate?name=...
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<CertificateQuery>,
) -> Result<Response, AppError> {
    tracing::info!(name = %query.name, "Generating certificate");

    let template_path = &state.config.assets.certificate_template;
    let data = tokio::fs::read(template_path).await.map_err(|e| {
        AppError::Internal(format!(
            "Failed to read certificate template {}: {}",
            template_path.display(),
            e
        ))
    })?;

    let template = Picture::decode(&data)?;

    let font = state
        .fonts
        .resolve_and_load(state.config.assets.certificate_font.as_deref(), None)
        .await?;

    let options = TextOptions {
        font_size: CERTIFICATE_FONT_SIZE,
        // Navy blue name with a white outline
        fill: Rgba::new(0, 0, 128, 255),
        stroke: Some(Stroke {
            color: Rgba::white(),
            width: 2.0,
        }),
        ..TextOptions::default()
    };

    // Centered in the bordered area of the template
    let x = template.width() as i64 / 2;
    let y = (template.height() as f64 * 0.6) as i64;

    let with_name = template.draw_text(&query.name, Placement::At { x, y }, &options, &font)?;

    Ok(image_response(
        with_name.encode(OutputFormat::Png, DEFAULT_CONVERT_QUALITY)?,
    ))
}
