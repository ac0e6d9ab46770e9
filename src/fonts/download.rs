//! Remote font downloading.
//!
//! Downloads are cached on disk, content-addressed by the SHA-256 of the URL
//! plus the URL's extension, so repeated requests for the same font reuse the
//! file instead of accumulating temp files. Concurrent requests for the same
//! URL are safe: each writer lands on a unique temp name and renames into
//! place.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::constants::DEFAULT_FONT_EXTENSION;

use super::error::FontError;

/// Require an http/https URL.
pub fn validate_scheme(url: &str) -> Result<(), FontError> {
    let lowered = url.to_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        Ok(())
    } else {
        Err(FontError::InvalidUrl(url.to_string()))
    }
}

/// Extension of the URL's path segment, defaulting to `ttf`.
///
/// Query string and fragment are ignored; anything non-alphanumeric falls
/// back to the default so the cache file name stays well-formed.
pub fn url_extension(url: &str) -> String {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .rsplit('/')
        .next()
        .unwrap_or("");

    match path.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_lowercase()
        }
        _ => DEFAULT_FONT_EXTENSION.to_string(),
    }
}

/// Cache file name for a URL: SHA-256 of the URL plus its extension.
pub fn cache_file_name(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    format!("{}.{}", hex::encode(digest), url_extension(url))
}

/// Download a font into the cache directory, returning the cached path.
///
/// A cache hit returns without network I/O. Non-2xx responses and empty
/// bodies are client-facing failures.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    cache_dir: &Path,
) -> Result<PathBuf, FontError> {
    validate_scheme(url)?;

    let target = cache_dir.join(cache_file_name(url));
    if target.is_file() {
        tracing::debug!(url = %url, path = %target.display(), "Font cache hit");
        return Ok(target);
    }

    tracing::info!(url = %url, "Downloading font");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FontError::DownloadFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FontError::DownloadFailed(format!(
            "status {}",
            response.status()
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FontError::DownloadFailed(e.to_string()))?;

    if body.is_empty() {
        return Err(FontError::EmptyResponse(url.to_string()));
    }

    tokio::fs::create_dir_all(cache_dir)
        .await
        .map_err(|e| FontError::Io(e.to_string()))?;

    // Unique temp name, then rename: concurrent downloads of the same URL
    // never observe a partially written file.
    let temp = cache_dir.join(format!(".{}.partial", Uuid::new_v4()));
    tokio::fs::write(&temp, &body)
        .await
        .map_err(|e| FontError::Io(e.to_string()))?;
    tokio::fs::rename(&temp, &target)
        .await
        .map_err(|e| FontError::Io(e.to_string()))?;

    tracing::info!(
        url = %url,
        path = %target.display(),
        size_bytes = body.len(),
        "Font downloaded"
    );

    Ok(target)
}
