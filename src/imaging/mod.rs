//! Imaging adapter.
//!
//! A typed facade over the `image` / `ab_glyph` / `fast_image_resize`
//! ecosystem crates. Handlers never touch pixel buffers directly; they
//! decode into a [`Picture`], apply transforms, and encode the result.
//!
//! # Layout
//!
//! - [`picture`] — the decode → transform → encode facade
//! - [`resize`] — fit-mode planning and pixel scaling
//! - [`text`] — styled text rendering to an RGBA layer
//! - [`compose`] — blend modes and overlay compositing
//! - [`position`] — 9-grid / gravity / coordinate anchoring
//! - [`metadata`] — container and EXIF probing
//! - [`encoder`] — per-format encoders behind one trait
//! - [`format`] — output format mapping
//! - [`color`] — the shared RGBA color type
//! - [`error`] — structured errors with HTTP status mapping

pub mod color;
pub mod compose;
pub mod encoder;
pub mod error;
pub mod format;
pub mod metadata;
pub mod picture;
pub mod position;
pub mod resize;
pub mod text;

// Re-export main types for convenience
pub use color::Rgba;
pub use compose::BlendMode;
pub use encoder::{EncodedImage, EncoderQuality, ImageEncoder};
pub use error::ImageError;
pub use format::OutputFormat;
pub use metadata::Metadata;
pub use picture::{Picture, QuarterTurn};
pub use position::{anchor, Gravity, NamedPosition, Placement};
pub use resize::{plan_resize, FitMode, ResizePlan};
pub use text::{render_text, Shadow, Stroke, TextAlign, TextOptions};
