//! Asset and font configuration types.
//!
//! Asset and font locations are explicit configuration injected at startup;
//! nothing is inferred from the deployment environment at request time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DOWNLOAD_TIMEOUT_SECS, FONT_CACHE_SUBDIR, FONT_SEARCH_PATHS};

fn default_certificate_template() -> PathBuf {
    PathBuf::from("assets/certificate.png")
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join(FONT_CACHE_SUBDIR)
}

fn default_search_paths() -> Vec<PathBuf> {
    FONT_SEARCH_PATHS.iter().map(PathBuf::from).collect()
}

fn default_download_timeout() -> u64 {
    DEFAULT_DOWNLOAD_TIMEOUT_SECS
}

/// Static assets used by the certificate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Certificate template image
    #[serde(default = "default_certificate_template")]
    pub certificate_template: PathBuf,
    /// Font name or path for certificate text; the system fallback applies
    /// when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_font: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            certificate_template: default_certificate_template(),
            certificate_font: None,
        }
    }
}

/// Font resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontsConfig {
    /// Directory for downloaded fonts (default: a subdirectory of the
    /// system temp dir)
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Directories scanned for system fonts
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
    /// Timeout for outbound font downloads in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            search_paths: default_search_paths(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}
