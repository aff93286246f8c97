use image::{imageops::FilterType, DynamicImage, GrayImage, ImageFormat, Luma};

use crate::config::OcrConfig;
use crate::error::{PapyrError, Result};

/// Transform a decoded bitmap into the form Tesseract reads best.
///
/// Applies the following transformations, in order:
/// 1. Converts to single-channel grayscale
/// 2. Upscales both dimensions by the configured integer factor to
///    improve small-stroke legibility
/// 3. Stretches contrast so the darkest/lightest pixels span 0..255
/// 4. Binarizes at the configured threshold
///
/// The output is strictly two-tone. No adaptive thresholding, skew
/// correction, or noise filtering is attempted.
pub fn prepare_for_recognition(img: DynamicImage, config: &OcrConfig) -> GrayImage {
    let gray = img.to_luma8();
    let upscaled = upscale(gray, config.upscale_factor);
    let stretched = stretch_contrast(upscaled);
    binarize(stretched, config.binarize_threshold)
}

/// Encode a grayscale image as PNG bytes for the OCR engine.
pub fn encode_png(gray: &GrayImage) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    gray.write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| PapyrError::Extraction(format!("Failed to encode image: {e}")))?;
    Ok(output)
}

/// Upscale both dimensions by an integer factor.
///
/// Uses Lanczos3 for high-quality resampling.
fn upscale(gray: GrayImage, factor: u32) -> GrayImage {
    if factor <= 1 {
        return gray;
    }
    let (width, height) = gray.dimensions();
    image::imageops::resize(&gray, width * factor, height * factor, FilterType::Lanczos3)
}

/// Stretch contrast on a grayscale image using its histogram extremes.
///
/// Maps the darkest pixel to 0 and the lightest to 255, scaling all
/// intermediate values linearly.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let mut min_val = 255u8;
    let mut max_val = 0u8;

    for pixel in gray.pixels() {
        let val = pixel[0];
        if val < min_val {
            min_val = val;
        }
        if val > max_val {
            max_val = val;
        }
    }

    // A flat image has no contrast to stretch.
    if max_val <= min_val {
        return gray;
    }

    let range = (max_val - min_val) as f32;
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y);
        let normalized = (pixel[0] - min_val) as f32 / range;
        Luma([(normalized * 255.0) as u8])
    })
}

/// Reduce to exactly two intensity values: below the threshold becomes
/// black, at or above becomes white.
fn binarize(gray: GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] < threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OcrConfig {
        OcrConfig {
            languages: "eng".to_string(),
            tessdata_path: None,
            page_seg_mode: 6,
            timeout_secs: 60,
            upscale_factor: 2,
            binarize_threshold: 150,
        }
    }

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let gray = GrayImage::from_fn(width, height, |x, _y| {
            // Low-contrast horizontal gradient starting at 60
            Luma([(60 + x % 180) as u8])
        });
        DynamicImage::ImageLuma8(gray)
    }

    #[test]
    fn test_output_dimensions_are_doubled() {
        let config = test_config();
        let processed = prepare_for_recognition(gradient_image(100, 40), &config);
        assert_eq!(processed.width(), 200);
        assert_eq!(processed.height(), 80);
    }

    #[test]
    fn test_output_is_strictly_two_tone() {
        let config = test_config();
        let processed = prepare_for_recognition(gradient_image(64, 64), &config);
        assert!(
            processed.pixels().all(|p| p[0] == 0 || p[0] == 255),
            "found intermediate intensity after binarization"
        );
    }

    #[test]
    fn test_rgb_input_is_converted() {
        let config = test_config();
        let rgb = DynamicImage::new_rgb8(30, 20);
        let processed = prepare_for_recognition(rgb, &config);
        assert_eq!(processed.dimensions(), (60, 40));
        assert!(processed.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_upscale_factor_one_is_noop() {
        let gray = GrayImage::from_pixel(10, 10, Luma([128]));
        let result = upscale(gray, 1);
        assert_eq!(result.dimensions(), (10, 10));
    }

    #[test]
    fn test_stretch_contrast_spans_full_range() {
        let gray = GrayImage::from_fn(16, 1, |x, _| Luma([(100 + x * 3) as u8]));
        let stretched = stretch_contrast(gray);

        let values: Vec<u8> = stretched.pixels().map(|p| p[0]).collect();
        assert_eq!(*values.iter().min().unwrap(), 0);
        assert_eq!(*values.iter().max().unwrap(), 255);
    }

    #[test]
    fn test_stretch_contrast_flat_image_unchanged() {
        let gray = GrayImage::from_pixel(10, 10, Luma([100]));
        let stretched = stretch_contrast(gray);
        assert!(stretched.pixels().all(|p| p[0] == 100));
    }

    #[test]
    fn test_binarize_threshold_boundary() {
        let gray = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 149 } else { 150 }]));
        let binarized = binarize(gray, 150);
        assert_eq!(binarized.get_pixel(0, 0)[0], 0);
        assert_eq!(binarized.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn test_encode_png_round_trips() {
        let gray = GrayImage::from_pixel(8, 8, Luma([255]));
        let png = encode_png(&gray).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.to_luma8().dimensions(), (8, 8));
    }
}
