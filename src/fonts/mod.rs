//! Font resolution.
//!
//! Turns the `font` / `fontUrl` form fields into a loadable font face.
//! Resolution priority: remote URL (downloaded and cached), then an explicit
//! path or symbolic name, then any discovered system font. With nothing
//! usable the request fails; the service bundles no fonts of its own.

pub mod discovery;
pub mod download;
pub mod error;

use std::path::PathBuf;
use std::time::Duration;

use ab_glyph::FontVec;

use crate::config::FontsConfig;

pub use discovery::{find_any_font, find_named_font};
pub use error::FontError;

/// A resolved font source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontReference {
    /// Symbolic name, resolved against the search paths at load time.
    Named(String),
    /// Existing local file.
    Path(PathBuf),
    /// File downloaded into the font cache for this URL.
    Downloaded(PathBuf),
}

/// Resolves and loads fonts for request handling.
#[derive(Debug, Clone)]
pub struct FontResolver {
    http: reqwest::Client,
    cache_dir: PathBuf,
    search_paths: Vec<PathBuf>,
}

impl FontResolver {
    pub fn new(config: &FontsConfig) -> Result<Self, FontError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout_secs))
            .build()
            .map_err(|e| FontError::Io(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            cache_dir: config.cache_dir.clone(),
            search_paths: config.search_paths.clone(),
        })
    }

    /// Resolve the font fields to a reference.
    ///
    /// The URL wins over the explicit name; with neither, resolution falls
    /// back to the first discovered system font and fails if there is none.
    pub async fn resolve(
        &self,
        font: Option<&str>,
        font_url: Option<&str>,
    ) -> Result<FontReference, FontError> {
        if let Some(url) = font_url.map(str::trim).filter(|u| !u.is_empty()) {
            let path = download::download(&self.http, url, &self.cache_dir).await?;
            return Ok(FontReference::Downloaded(path));
        }

        if let Some(name) = font.map(str::trim).filter(|f| !f.is_empty()) {
            let path = PathBuf::from(name);
            if path.is_file() {
                return Ok(FontReference::Path(path));
            }
            return Ok(FontReference::Named(name.to_string()));
        }

        match find_any_font(&self.search_paths) {
            Some(path) => Ok(FontReference::Path(path)),
            None => Err(FontError::NoFontAvailable),
        }
    }

    /// Load the referenced font face.
    ///
    /// A symbolic name is matched against file stems in the search paths;
    /// an unknown name degrades to any available system font rather than
    /// failing the request.
    pub fn load(&self, reference: &FontReference) -> Result<FontVec, FontError> {
        let path = match reference {
            FontReference::Path(path) | FontReference::Downloaded(path) => path.clone(),
            FontReference::Named(name) => find_named_font(&self.search_paths, name)
                .or_else(|| find_any_font(&self.search_paths))
                .ok_or(FontError::NoFontAvailable)?,
        };

        let bytes = std::fs::read(&path).map_err(|e| FontError::Io(e.to_string()))?;
        FontVec::try_from_vec(bytes)
            .map_err(|_| FontError::InvalidFont(path.display().to_string()))
    }

    /// Resolve and load in one step.
    pub async fn resolve_and_load(
        &self,
        font: Option<&str>,
        font_url: Option<&str>,
    ) -> Result<FontVec, FontError> {
        let reference = self.resolve(font, font_url).await?;
        self.load(&reference)
    }
}
