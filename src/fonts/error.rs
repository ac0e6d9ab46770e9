//! Font resolution error types.

use thiserror::Error;

/// Errors that can occur while resolving or loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font URL used a scheme other than http/https
    #[error("Font URL must be http or https: {0}")]
    InvalidUrl(String),

    /// The download failed (network error or non-2xx status)
    #[error("Failed to download font: {0}")]
    DownloadFailed(String),

    /// The download succeeded but the body was empty
    #[error("Empty font response from {0}")]
    EmptyResponse(String),

    /// Neither a font nor a font URL was supplied and no system font exists
    #[error("No system fonts available. Provide font or fontUrl.")]
    NoFontAvailable,

    /// The font file could not be parsed
    #[error("Invalid font file: {0}")]
    InvalidFont(String),

    /// Filesystem failure while caching or reading a font
    #[error("Font I/O error: {0}")]
    Io(String),
}

impl FontError {
    /// Maps font errors to HTTP status codes.
    ///
    /// Everything the client controls (URL, availability, file contents) is
    /// a 400; only local filesystem failures are a 500.
    pub fn to_http_status(&self) -> u16 {
        match self {
            FontError::InvalidUrl(_)
            | FontError::DownloadFailed(_)
            | FontError::EmptyResponse(_)
            | FontError::NoFontAvailable
            | FontError::InvalidFont(_) => 400,
            FontError::Io(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(FontError::InvalidUrl("ftp://x".into()).to_http_status(), 400);
        assert_eq!(
            FontError::DownloadFailed("status 404".into()).to_http_status(),
            400
        );
        assert_eq!(FontError::NoFontAvailable.to_http_status(), 400);
        assert_eq!(FontError::Io("disk full".into()).to_http_status(), 500);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FontError::NoFontAvailable.to_string(),
            "No system fonts available. Provide font or fontUrl."
        );
        assert_eq!(
            FontError::InvalidUrl("ftp://fonts".into()).to_string(),
            "Font URL must be http or https: ftp://fonts"
        );
    }
}
