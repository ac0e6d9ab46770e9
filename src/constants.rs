// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase.
// Using constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Server defaults
// =============================================================================

/// Default bind address
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum request body size (50 MB, sized for image uploads)
pub const DEFAULT_MAX_BODY_SIZE: usize = 50 * 1024 * 1024;

// =============================================================================
// Text rendering defaults
// =============================================================================

/// Default font size in points
pub const DEFAULT_FONT_SIZE: u32 = 48;

/// Default rendering DPI
pub const DEFAULT_DPI: u32 = 72;

/// Font size used for certificate name rendering
pub const CERTIFICATE_FONT_SIZE: u32 = 96;

// =============================================================================
// Encoding defaults
// =============================================================================

/// Default JPEG quality for resize/rotate responses
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Default encode quality when a request omits one
pub const DEFAULT_CONVERT_QUALITY: u8 = 85;

// =============================================================================
// Font resolution defaults
// =============================================================================

/// Well-known directories scanned for system fonts
pub const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
];

/// Subdirectory of the system temp dir used for downloaded fonts
pub const FONT_CACHE_SUBDIR: &str = "ukiyo-fonts";

/// Extension assumed for font URLs that carry none
pub const DEFAULT_FONT_EXTENSION: &str = "ttf";

/// Timeout for outbound font downloads in seconds
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;
