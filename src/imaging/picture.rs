//! Picture facade.
//!
//! `Picture` is the typed entry point the handlers work against: decode once,
//! apply transforms, encode once. Every transform returns a new `Picture` so
//! handlers stay linear pipelines with no shared state.

use std::io::Cursor;

use ab_glyph::FontVec;
use image::{DynamicImage, ImageFormat};

use super::compose::{composite, BlendMode};
use super::encoder::{EncodedImage, EncoderFactory, EncoderQuality};
use super::error::ImageError;
use super::format::OutputFormat;
use super::position::{anchor, Placement};
use super::resize::{resize, FitMode};
use super::text::{render_text, TextOptions};

/// Quarter-turn rotation angles.
///
/// Anything other than 90/180/270 is treated as "no rotation" upstream; the
/// request still succeeds and re-encodes the image unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterTurn {
    Rotate90,
    Rotate180,
    Rotate270,
}

impl QuarterTurn {
    /// Recognize a rotation angle. Unsupported angles yield `None`.
    pub fn from_angle(angle: i64) -> Option<Self> {
        match angle {
            90 => Some(QuarterTurn::Rotate90),
            180 => Some(QuarterTurn::Rotate180),
            270 => Some(QuarterTurn::Rotate270),
            _ => None,
        }
    }
}

/// A decoded image plus its source format.
#[derive(Debug, Clone)]
pub struct Picture {
    image: DynamicImage,
    source_format: Option<ImageFormat>,
}

impl Picture {
    /// Decode raw bytes, guessing the container format from content.
    pub fn decode(data: &[u8]) -> Result<Self, ImageError> {
        let reader = image::io::Reader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ImageError::decode_failed(e.to_string()))?;

        let source_format = reader.format();
        let image = reader
            .decode()
            .map_err(|e| ImageError::decode_failed(e.to_string()))?;

        Ok(Self {
            image,
            source_format,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Output format matching the source container, when representable.
    pub fn source_output_format(&self) -> Option<OutputFormat> {
        self.source_format.and_then(OutputFormat::from_image_format)
    }

    /// Resize with the given bounds and fit mode.
    pub fn resize(
        &self,
        width: Option<u32>,
        height: Option<u32>,
        fit: FitMode,
    ) -> Result<Picture, ImageError> {
        Ok(Picture {
            image: resize(&self.image, width, height, fit)?,
            source_format: self.source_format,
        })
    }

    /// Rotate by a quarter turn.
    pub fn rotate(&self, turn: QuarterTurn) -> Picture {
        let image = match turn {
            QuarterTurn::Rotate90 => self.image.rotate90(),
            QuarterTurn::Rotate180 => self.image.rotate180(),
            QuarterTurn::Rotate270 => self.image.rotate270(),
        };

        Picture {
            image,
            source_format: self.source_format,
        }
    }

    /// Render text and composite it at the given placement.
    pub fn draw_text(
        &self,
        text: &str,
        placement: Placement,
        options: &TextOptions,
        font: &FontVec,
    ) -> Result<Picture, ImageError> {
        let layer = render_text(text, font, options)?;

        let (x, y) = anchor(
            placement,
            self.width(),
            self.height(),
            layer.width(),
            layer.height(),
        );

        let mut base = self.image.to_rgba8();
        composite(&mut base, &layer, x, y, BlendMode::Over, 1.0);

        Ok(Picture {
            image: DynamicImage::ImageRgba8(base),
            source_format: self.source_format,
        })
    }

    /// Composite an overlay picture at the given offset.
    pub fn composite(
        &self,
        overlay: &Picture,
        x: i64,
        y: i64,
        mode: BlendMode,
        opacity: f32,
    ) -> Picture {
        let mut base = self.image.to_rgba8();
        let overlay_rgba = overlay.image.to_rgba8();
        composite(&mut base, &overlay_rgba, x, y, mode, opacity);

        Picture {
            image: DynamicImage::ImageRgba8(base),
            source_format: self.source_format,
        }
    }

    /// Encode to the target format at the given quality.
    pub fn encode(&self, format: OutputFormat, quality: u8) -> Result<EncodedImage, ImageError> {
        let encoder = EncoderFactory::create(format);
        let rgba = self.image.to_rgba8();
        encoder.encode(
            rgba.as_raw(),
            self.width(),
            self.height(),
            EncoderQuality::with_quality(quality),
        )
    }
}
