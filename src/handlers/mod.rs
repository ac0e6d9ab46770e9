//! Request handlers.
//!
//! Every image endpoint is the same linear pipeline: decode the uploaded
//! bytes, build options from form fields, apply the transform, encode the
//! response. The shared decode/respond steps live here; each endpoint module
//! is a thin declaration of its option schema and output format.

pub mod api;
pub mod certificate;
pub mod demo;
pub mod pages;

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::imaging::{EncodedImage, Picture};

/// Decode an uploaded file part into a picture.
///
/// An empty part is a client error; decode failures from the imaging
/// adapter propagate with their own status.
pub(crate) fn decode_upload(field: &str, data: &[u8]) -> Result<Picture, AppError> {
    if data.is_empty() {
        return Err(AppError::bad_request(format!(
            "Failed to read {} data",
            field
        )));
    }

    Ok(Picture::decode(data)?)
}

/// Build an HTTP response from an encoded image.
pub(crate) fn image_response(encoded: EncodedImage) -> Response {
    (
        [(header::CONTENT_TYPE, encoded.content_type)],
        encoded.data,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_upload_empty_is_bad_request() {
        let err = decode_upload("image", &[]).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("image"));
    }

    #[test]
    fn test_decode_upload_garbage_is_bad_request() {
        let err = decode_upload("image", &[1, 2, 3]).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
