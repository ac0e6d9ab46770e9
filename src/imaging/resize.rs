//! Resize planning and execution
//!
//! Dimension math lives in `plan_resize` so it can be tested without touching
//! pixels; the pixel work is delegated to `fast_image_resize` with a Lanczos3
//! filter.

use std::num::NonZeroU32;

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::DynamicImage;

use super::error::ImageError;

/// How to fit the image within target dimensions
///
/// - `Cover` fills the target bounds, cropping excess.
/// - `Fill` stretches to the exact bounds, ignoring aspect ratio.
/// - `Inside` scales down to fit within the bounds, preserving aspect ratio
///   and never enlarging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    Cover,
    Fill,
    #[default]
    Inside,
}

impl FitMode {
    /// Lenient parse: unrecognized or absent input falls back to `Inside`.
    ///
    /// Malformed fit strings never abort a request; the default fit is an
    /// acceptable degradation for an image endpoint.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("cover") => FitMode::Cover,
            Some("fill") => FitMode::Fill,
            _ => FitMode::Inside,
        }
    }
}

/// Result of resize planning: the scale target and an optional center crop
/// applied after scaling (used by `Cover`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    pub scale_width: u32,
    pub scale_height: u32,
    pub crop: Option<CropRect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ResizePlan {
    fn identity(width: u32, height: u32) -> Self {
        Self {
            scale_width: width,
            scale_height: height,
            crop: None,
        }
    }

    /// Whether the plan changes the image at all.
    pub fn is_noop(&self, src_width: u32, src_height: u32) -> bool {
        self.scale_width == src_width && self.scale_height == src_height && self.crop.is_none()
    }
}

/// Compute the scale/crop plan for a resize request.
///
/// Either dimension may be absent; the missing one is computed from the
/// source aspect ratio. With neither given the plan is the identity.
pub fn plan_resize(
    src_width: u32,
    src_height: u32,
    width: Option<u32>,
    height: Option<u32>,
    fit: FitMode,
) -> ResizePlan {
    let aspect = src_width as f64 / src_height as f64;

    match (width, height) {
        (None, None) => ResizePlan::identity(src_width, src_height),

        // One bound: aspect-preserving scale regardless of fit mode. Inside
        // additionally refuses to enlarge.
        (Some(w), None) => {
            let w = effective_target(w, src_width, fit);
            let h = ((w as f64 / aspect).round() as u32).max(1);
            ResizePlan::identity(w.max(1), h)
        }
        (None, Some(h)) => {
            let h = effective_target(h, src_height, fit);
            let w = ((h as f64 * aspect).round() as u32).max(1);
            ResizePlan::identity(w, h.max(1))
        }

        (Some(w), Some(h)) => {
            let w = w.max(1);
            let h = h.max(1);
            match fit {
                FitMode::Fill => ResizePlan::identity(w, h),
                FitMode::Inside => {
                    let factor = (w as f64 / src_width as f64)
                        .min(h as f64 / src_height as f64)
                        .min(1.0);
                    ResizePlan::identity(
                        ((src_width as f64 * factor).round() as u32).max(1),
                        ((src_height as f64 * factor).round() as u32).max(1),
                    )
                }
                FitMode::Cover => {
                    let factor =
                        (w as f64 / src_width as f64).max(h as f64 / src_height as f64);
                    let scale_w = ((src_width as f64 * factor).round() as u32).max(w);
                    let scale_h = ((src_height as f64 * factor).round() as u32).max(h);
                    let crop = if scale_w != w || scale_h != h {
                        Some(CropRect {
                            x: (scale_w - w) / 2,
                            y: (scale_h - h) / 2,
                            width: w,
                            height: h,
                        })
                    } else {
                        None
                    };
                    ResizePlan {
                        scale_width: scale_w,
                        scale_height: scale_h,
                        crop,
                    }
                }
            }
        }
    }
}

fn effective_target(target: u32, source: u32, fit: FitMode) -> u32 {
    match fit {
        FitMode::Inside => target.min(source).max(1),
        _ => target.max(1),
    }
}

/// Resize an image according to the plan produced by `plan_resize`.
pub fn resize(
    img: &DynamicImage,
    width: Option<u32>,
    height: Option<u32>,
    fit: FitMode,
) -> Result<DynamicImage, ImageError> {
    let plan = plan_resize(img.width(), img.height(), width, height, fit);

    if plan.is_noop(img.width(), img.height()) {
        return Ok(img.clone());
    }

    let scaled = scale_pixels(img, plan.scale_width, plan.scale_height)?;

    Ok(match plan.crop {
        Some(c) => scaled.crop_imm(c.x, c.y, c.width, c.height),
        None => scaled,
    })
}

/// Scale pixels using fast-image-resize with a Lanczos3 filter
fn scale_pixels(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, ImageError> {
    let src_width = NonZeroU32::new(img.width())
        .ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height = NonZeroU32::new(target_h)
        .ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.to_rgba8().into_raw(),
        PixelType::U8x4,
    )
    .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    let rgba_image = image::RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))?;

    Ok(DynamicImage::ImageRgba8(rgba_image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_mode_parse_lenient() {
        assert_eq!(FitMode::parse_lenient(Some("cover")), FitMode::Cover);
        assert_eq!(FitMode::parse_lenient(Some("FILL")), FitMode::Fill);
        assert_eq!(FitMode::parse_lenient(Some("inside")), FitMode::Inside);
        // Unknown and absent fall back to the default
        assert_eq!(FitMode::parse_lenient(Some("stretch")), FitMode::Inside);
        assert_eq!(FitMode::parse_lenient(None), FitMode::Inside);
    }

    #[test]
    fn test_plan_no_dimensions_is_identity() {
        let plan = plan_resize(800, 600, None, None, FitMode::Inside);
        assert!(plan.is_noop(800, 600));
    }

    #[test]
    fn test_plan_inside_width_only_preserves_aspect() {
        let plan = plan_resize(800, 600, Some(400), None, FitMode::Inside);
        assert_eq!((plan.scale_width, plan.scale_height), (400, 300));
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_plan_inside_height_only_preserves_aspect() {
        let plan = plan_resize(800, 600, None, Some(300), FitMode::Inside);
        assert_eq!((plan.scale_width, plan.scale_height), (400, 300));
    }

    #[test]
    fn test_plan_inside_never_enlarges() {
        let plan = plan_resize(100, 100, Some(200), Some(200), FitMode::Inside);
        assert!(plan.is_noop(100, 100));

        let plan = plan_resize(100, 50, Some(400), None, FitMode::Inside);
        assert_eq!((plan.scale_width, plan.scale_height), (100, 50));
    }

    #[test]
    fn test_plan_inside_both_bounds() {
        // 800x600 into 400x400: limited by width, 400x300
        let plan = plan_resize(800, 600, Some(400), Some(400), FitMode::Inside);
        assert_eq!((plan.scale_width, plan.scale_height), (400, 300));
    }

    #[test]
    fn test_plan_fill_stretches() {
        let plan = plan_resize(800, 600, Some(100), Some(100), FitMode::Fill);
        assert_eq!((plan.scale_width, plan.scale_height), (100, 100));
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_plan_cover_crops_excess() {
        // 800x600 into 400x400: scale by height ratio (0.666..) to 533x400,
        // then center-crop the width down to 400.
        let plan = plan_resize(800, 600, Some(400), Some(400), FitMode::Cover);
        assert_eq!((plan.scale_width, plan.scale_height), (533, 400));
        let crop = plan.crop.unwrap();
        assert_eq!((crop.width, crop.height), (400, 400));
        assert_eq!(crop.x, 66);
        assert_eq!(crop.y, 0);
    }

    #[test]
    fn test_plan_cover_may_enlarge() {
        let plan = plan_resize(100, 100, Some(200), Some(200), FitMode::Cover);
        assert_eq!((plan.scale_width, plan.scale_height), (200, 200));
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_resize_executes_plan() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            8,
            4,
            image::Rgba([128, 64, 32, 255]),
        ));

        let out = resize(&img, Some(4), None, FitMode::Inside).unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));

        let out = resize(&img, Some(4), Some(4), FitMode::Fill).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));

        let out = resize(&img, Some(2), Some(2), FitMode::Cover).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
    }

    #[test]
    fn test_resize_noop_returns_same_dimensions() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            8,
            4,
            image::Rgba([1, 2, 3, 255]),
        ));
        let out = resize(&img, None, None, FitMode::Inside).unwrap();
        assert_eq!((out.width(), out.height()), (8, 4));
    }
}
