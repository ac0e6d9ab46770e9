//! Imaging error types
//!
//! Provides structured error handling with HTTP status mapping so handlers
//! can surface adapter failures without inspecting variants.

use std::fmt;

/// Errors that can occur inside the imaging adapter
#[derive(Debug, Clone)]
pub enum ImageError {
    // === Decoding Errors ===
    /// Image format is not supported
    UnsupportedFormat { format: String },
    /// Failed to decode image data
    DecodeFailed { message: String },

    // === Processing Errors ===
    /// Resize operation failed
    ResizeFailed { message: String },
    /// Text rendering failed
    RenderFailed { message: String },
    /// Compositing failed
    CompositeFailed { message: String },
    /// Encoding to output format failed
    EncodeFailed { format: String, message: String },

    // === Parameter Errors ===
    /// Invalid transformation parameter
    InvalidParameter { param: String, message: String },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::UnsupportedFormat { format } => {
                write!(f, "Unsupported image format: {}", format)
            }
            ImageError::DecodeFailed { message } => {
                write!(f, "Failed to decode image: {}", message)
            }
            ImageError::ResizeFailed { message } => {
                write!(f, "Resize failed: {}", message)
            }
            ImageError::RenderFailed { message } => {
                write!(f, "Failed to render text: {}", message)
            }
            ImageError::CompositeFailed { message } => {
                write!(f, "Failed to composite images: {}", message)
            }
            ImageError::EncodeFailed { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
            ImageError::InvalidParameter { param, message } => {
                write!(f, "Invalid parameter '{}': {}", param, message)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageError {
    /// Maps imaging errors to HTTP status codes
    ///
    /// Status mapping:
    /// - UnsupportedFormat → 415 (Unsupported Media Type)
    /// - DecodeFailed, InvalidParameter → 400 (Bad Request)
    /// - ResizeFailed, RenderFailed, CompositeFailed, EncodeFailed → 500
    pub fn to_http_status(&self) -> u16 {
        match self {
            ImageError::UnsupportedFormat { .. } => 415,

            ImageError::DecodeFailed { .. } | ImageError::InvalidParameter { .. } => 400,

            ImageError::ResizeFailed { .. }
            | ImageError::RenderFailed { .. }
            | ImageError::CompositeFailed { .. }
            | ImageError::EncodeFailed { .. } => 500,
        }
    }

    /// Helper constructors for common error patterns
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        ImageError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        ImageError::DecodeFailed {
            message: message.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        ImageError::ResizeFailed {
            message: message.into(),
        }
    }

    pub fn render_failed(message: impl Into<String>) -> Self {
        ImageError::RenderFailed {
            message: message.into(),
        }
    }

    pub fn composite_failed(message: impl Into<String>) -> Self {
        ImageError::CompositeFailed {
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}
