//! Image metadata probing.
//!
//! Extracts the properties reported by the metadata endpoints: dimensions,
//! channel layout, source format, and — where the container carries them —
//! EXIF orientation and pixel density, plus the page (frame) count for
//! animated formats.

use std::io::Cursor;

use image::ImageFormat;
use serde::Serialize;

use super::error::ImageError;

/// Probed image properties.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub has_alpha: bool,
    /// Source container format, when recognized.
    pub format: Option<String>,
    /// Color interpretation: "srgb" or "gray".
    pub color_space: String,
    /// EXIF orientation (1-8), when present.
    pub orientation: Option<u32>,
    /// EXIF X resolution in dots per inch, when present.
    pub density: Option<f64>,
    /// Frame count for animated formats, 1 otherwise.
    pub pages: u32,
}

impl Metadata {
    /// Probe raw image bytes.
    ///
    /// Decode failures propagate; missing EXIF data is not an error.
    pub fn probe(data: &[u8]) -> Result<Self, ImageError> {
        let reader = image::io::Reader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ImageError::decode_failed(e.to_string()))?;

        let format = reader.format();
        let img = reader
            .decode()
            .map_err(|e| ImageError::decode_failed(e.to_string()))?;

        let color = img.color();
        let (orientation, density) = exif_fields(data);

        Ok(Metadata {
            width: img.width(),
            height: img.height(),
            channels: color.channel_count(),
            has_alpha: color.has_alpha(),
            format: format.map(format_name),
            color_space: color_space_name(color).to_string(),
            orientation,
            density,
            pages: page_count(data, format),
        })
    }
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

fn color_space_name(color: image::ColorType) -> &'static str {
    use image::ColorType::*;
    match color {
        L8 | L16 | La8 | La16 => "gray",
        _ => "srgb",
    }
}

/// EXIF orientation and X resolution, when the container carries them.
fn exif_fields(data: &[u8]) -> (Option<u32>, Option<f64>) {
    let mut cursor = Cursor::new(data);
    let exif = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(_) => return (None, None),
    };

    let orientation = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));

    let density = exif
        .get_field(exif::Tag::XResolution, exif::In::PRIMARY)
        .and_then(|field| match &field.value {
            exif::Value::Rational(values) => values.first().map(|r| r.to_f64()),
            _ => None,
        });

    (orientation, density)
}

/// Frame count for animated formats. Single-frame formats report 1.
fn page_count(data: &[u8], format: Option<ImageFormat>) -> u32 {
    if format != Some(ImageFormat::Gif) {
        return 1;
    }

    use image::AnimationDecoder;
    match image::codecs::gif::GifDecoder::new(Cursor::new(data)) {
        Ok(decoder) => {
            let frames = decoder.into_frames().count() as u32;
            frames.max(1)
        }
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png_rgba(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 128]));
        let mut buffer = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn encode_jpeg_rgb(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
        let mut buffer = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Jpeg)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_probe_png_rgba() {
        let data = encode_png_rgba(6, 4);
        let meta = Metadata::probe(&data).unwrap();

        assert_eq!(meta.width, 6);
        assert_eq!(meta.height, 4);
        assert_eq!(meta.channels, 4);
        assert!(meta.has_alpha);
        assert_eq!(meta.format.as_deref(), Some("png"));
        assert_eq!(meta.color_space, "srgb");
        assert_eq!(meta.pages, 1);
    }

    #[test]
    fn test_probe_jpeg_rgb() {
        let data = encode_jpeg_rgb(3, 5);
        let meta = Metadata::probe(&data).unwrap();

        assert_eq!(meta.width, 3);
        assert_eq!(meta.height, 5);
        assert_eq!(meta.channels, 3);
        assert!(!meta.has_alpha);
        assert_eq!(meta.format.as_deref(), Some("jpeg"));
    }

    #[test]
    fn test_probe_invalid_data_fails() {
        let err = Metadata::probe(&[0, 1, 2, 3]).unwrap_err();
        assert_eq!(err.to_http_status(), 400);
    }

    #[test]
    fn test_plain_encodes_carry_no_exif() {
        let data = encode_png_rgba(2, 2);
        let meta = Metadata::probe(&data).unwrap();
        assert!(meta.orientation.is_none());
        assert!(meta.density.is_none());
    }
}
