use image::RgbImage;
use image::imageops;

use crate::cli::ScaleFilter;

/// Scale an image uniformly by an integer factor.
///
/// A factor of 1 returns the input untouched. Empty images (or a factor of 0)
/// produce an empty image of the scaled size without resampling.
pub fn scale_by_factor(img: RgbImage, factor: u32, filter: ScaleFilter) -> RgbImage {
    if factor == 1 {
        return img;
    }

    let (w, h) = img.dimensions();
    let new_width = w.saturating_mul(factor);
    let new_height = h.saturating_mul(factor);

    if new_width == 0 || new_height == 0 {
        return RgbImage::new(new_width, new_height);
    }

    imageops::resize(&img, new_width, new_height, filter.to_image_filter())
}
