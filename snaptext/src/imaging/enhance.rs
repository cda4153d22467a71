use image::{imageops::FilterType, DynamicImage, GrayImage};
use imageproc::contrast::adaptive_threshold;
use imageproc::filter::median_filter;

use crate::config::PipelineConfig;
use crate::imaging::Raster;

/// The fixed set of enhancement strategies, in declaration order.
///
/// Declaration order doubles as the tie-break order during best-result
/// selection, after the unmodified baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    GrayscaleContrast,
    AdaptiveThreshold,
    Denoise,
    Upscale,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::GrayscaleContrast,
        Strategy::AdaptiveThreshold,
        Strategy::Denoise,
        Strategy::Upscale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::GrayscaleContrast => "grayscale_contrast",
            Strategy::AdaptiveThreshold => "adaptive_threshold",
            Strategy::Denoise => "denoise",
            Strategy::Upscale => "upscale",
        }
    }

    /// Produce a candidate raster from the original.
    ///
    /// Pure: the input is never mutated. Returns `None` when the strategy
    /// does not apply (upscale on an already-large image), in which case it
    /// contributes no candidate.
    pub fn apply(&self, raster: &Raster, config: &PipelineConfig) -> Option<Raster> {
        let image = raster.image();
        let result = match self {
            Strategy::GrayscaleContrast => {
                DynamicImage::ImageLuma8(stretch_contrast(image.to_luma8()))
            }
            Strategy::AdaptiveThreshold => DynamicImage::ImageLuma8(adaptive_threshold(
                &image.to_luma8(),
                config.adaptive_block_radius,
            )),
            Strategy::Denoise => DynamicImage::ImageLuma8(median_filter(
                &image.to_luma8(),
                config.denoise_radius,
                config.denoise_radius,
            )),
            Strategy::Upscale => {
                let (width, height) = raster.dimensions();
                if width.min(height) >= config.upscale_min_dimension {
                    return None;
                }
                image.resize_exact(
                    width * config.upscale_factor,
                    height * config.upscale_factor,
                    FilterType::CatmullRom,
                )
            }
        };
        Some(Raster::new(result))
    }
}

/// Stretch a grayscale image's histogram to the full intensity range.
///
/// Maps the darkest pixel to 0 and the lightest to 255, scaling all
/// intermediate values linearly. A flat image is returned as-is.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let mut min_val = 255u8;
    let mut max_val = 0u8;

    for pixel in gray.pixels() {
        let val = pixel[0];
        min_val = min_val.min(val);
        max_val = max_val.max(val);
    }

    if max_val <= min_val {
        return gray;
    }

    let range = (max_val - min_val) as f32;
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y);
        let normalized = (pixel[0] - min_val) as f32 / range;
        image::Luma([(normalized * 255.0) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn test_config() -> PipelineConfig {
        PipelineConfig {
            word_count_weight: 2.0,
            min_word_floor: 3,
            short_result_penalty: 0.5,
            low_confidence_threshold: 60.0,
            upscale_min_dimension: 300,
            upscale_factor: 2,
            adaptive_block_radius: 12,
            denoise_radius: 1,
        }
    }

    fn gradient_raster(width: u32, height: u32) -> Raster {
        let gray = GrayImage::from_fn(width, height, |x, _y| {
            // Low-contrast gradient in the 50..140 band
            image::Luma([(50 + (x % 90)) as u8])
        });
        Raster::new(DynamicImage::ImageLuma8(gray))
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::GrayscaleContrast.name(), "grayscale_contrast");
        assert_eq!(Strategy::AdaptiveThreshold.name(), "adaptive_threshold");
        assert_eq!(Strategy::Denoise.name(), "denoise");
        assert_eq!(Strategy::Upscale.name(), "upscale");
    }

    #[test]
    fn test_grayscale_contrast_preserves_dimensions() {
        let raster = gradient_raster(120, 40);
        let out = Strategy::GrayscaleContrast
            .apply(&raster, &test_config())
            .unwrap();
        assert_eq!(out.dimensions(), (120, 40));
    }

    #[test]
    fn test_grayscale_contrast_stretches_range() {
        let raster = gradient_raster(100, 10);
        let out = Strategy::GrayscaleContrast
            .apply(&raster, &test_config())
            .unwrap();

        let gray = out.image().to_luma8();
        let mut min_val = 255u8;
        let mut max_val = 0u8;
        for pixel in gray.pixels() {
            min_val = min_val.min(pixel[0]);
            max_val = max_val.max(pixel[0]);
        }
        assert_eq!(min_val, 0, "darkest pixel should map to 0");
        assert_eq!(max_val, 255, "lightest pixel should map to 255");
    }

    #[test]
    fn test_stretch_contrast_flat_image_unchanged() {
        let gray = GrayImage::from_pixel(10, 10, image::Luma([128]));
        let out = stretch_contrast(gray);
        for pixel in out.pixels() {
            assert_eq!(pixel[0], 128);
        }
    }

    #[test]
    fn test_adaptive_threshold_binarizes() {
        let raster = gradient_raster(64, 64);
        let out = Strategy::AdaptiveThreshold
            .apply(&raster, &test_config())
            .unwrap();
        assert_eq!(out.dimensions(), (64, 64));

        let gray = out.image().to_luma8();
        assert!(
            gray.pixels().all(|p| p[0] == 0 || p[0] == 255),
            "adaptive threshold output should be binary"
        );
    }

    #[test]
    fn test_denoise_preserves_dimensions() {
        let raster = gradient_raster(80, 60);
        let out = Strategy::Denoise.apply(&raster, &test_config()).unwrap();
        assert_eq!(out.dimensions(), (80, 60));
    }

    #[test]
    fn test_upscale_doubles_small_image() {
        let raster = Raster::new(DynamicImage::new_rgb8(200, 150));
        let out = Strategy::Upscale.apply(&raster, &test_config()).unwrap();
        assert_eq!(out.dimensions(), (400, 300));
    }

    #[test]
    fn test_upscale_skips_large_image() {
        let raster = Raster::new(DynamicImage::new_rgb8(800, 600));
        let out = Strategy::Upscale.apply(&raster, &test_config());
        assert!(out.is_none(), "upscale should skip large images");
    }

    #[test]
    fn test_upscale_applies_on_short_dimension() {
        // Wide but short: the shorter dimension decides
        let raster = Raster::new(DynamicImage::new_rgb8(1000, 200));
        let out = Strategy::Upscale.apply(&raster, &test_config()).unwrap();
        assert_eq!(out.dimensions(), (2000, 400));
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let raster = gradient_raster(50, 50);
        let before = raster.image().to_luma8();
        let _ = Strategy::AdaptiveThreshold.apply(&raster, &test_config());
        assert_eq!(raster.image().to_luma8(), before);
    }
}
