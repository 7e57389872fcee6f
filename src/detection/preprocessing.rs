use image::{DynamicImage, GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Apply Gaussian blur to reduce noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Blur sigma equivalent to a square Gaussian kernel of the given side length.
pub(crate) fn sigma_for_window(window: u32) -> f32 {
    0.3 * ((window as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Adaptive Gaussian thresholding with inverted polarity.
///
/// The per-pixel threshold is the Gaussian-weighted mean of the local window
/// minus `constant`. Pixels at or below their threshold (darker or
/// higher-contrast than their surroundings) become foreground (255),
/// everything else background (0).
pub fn adaptive_threshold_inv(gray: &GrayImage, window: u32, constant: i16) -> GrayImage {
    let local_mean = gaussian_blur_f32(gray, sigma_for_window(window));

    let mut mask = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        let src = gray.get_pixel(x, y)[0] as i16;
        let threshold = local_mean.get_pixel(x, y)[0] as i16 - constant;
        *pixel = if src > threshold { Luma([0]) } else { Luma([255]) };
    }
    mask
}

/// Morphological closing with a square structuring element of L∞ radius
/// `radius` (side length `2 * radius + 1`). Fuses noise-fragmented regions
/// and fills small holes.
pub fn morphological_close(mask: &GrayImage, radius: u8) -> GrayImage {
    close(mask, Norm::LInf, radius)
}

/// Full preprocessing chain: grayscale, adaptive threshold, closing.
pub fn binarize(img: &DynamicImage, window: u32, constant: i16, closing_radius: u8) -> GrayImage {
    let gray = to_grayscale(img);
    let thresholded = adaptive_threshold_inv(&gray, window, constant);
    morphological_close(&thresholded, closing_radius)
}

/// Invert a binary mask in place: 255 becomes 0 and vice versa.
pub fn invert_mask(mask: &mut GrayImage) {
    for pixel in mask.pixels_mut() {
        pixel[0] = 255 - pixel[0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn uniform_image(w: u32, h: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, image::Rgb([value; 3])))
    }

    #[test]
    fn uniform_image_produces_empty_mask() {
        // No pixel is darker than its local mean minus the constant.
        let mask = binarize(&uniform_image(64, 64, 127), 15, 2, 2);
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn dark_spot_on_light_background_becomes_foreground() {
        let mut img = RgbImage::from_pixel(64, 64, image::Rgb([255; 3]));
        for y in 28..36 {
            for x in 28..36 {
                img.put_pixel(x, y, image::Rgb([0; 3]));
            }
        }
        let mask = binarize(&DynamicImage::ImageRgb8(img), 15, 2, 2);
        assert_eq!(mask.get_pixel(31, 31)[0], 255);
        assert_eq!(mask.get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn mask_is_strictly_binary() {
        let mut img = RgbImage::from_pixel(48, 48, image::Rgb([200; 3]));
        for y in 10..20 {
            for x in 10..20 {
                img.put_pixel(x, y, image::Rgb([30; 3]));
            }
        }
        let mask = binarize(&DynamicImage::ImageRgb8(img), 15, 2, 2);
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn binarize_is_deterministic() {
        let mut img = RgbImage::from_pixel(48, 48, image::Rgb([220; 3]));
        for y in 20..30 {
            for x in 8..40 {
                img.put_pixel(x, y, image::Rgb([10; 3]));
            }
        }
        let img = DynamicImage::ImageRgb8(img);
        let a = binarize(&img, 15, 2, 2);
        let b = binarize(&img, 15, 2, 2);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn invert_mask_flips_every_pixel() {
        let mut mask = GrayImage::from_pixel(8, 8, Luma([255]));
        mask.put_pixel(3, 3, Luma([0]));
        invert_mask(&mut mask);
        assert_eq!(mask.get_pixel(3, 3)[0], 255);
        assert_eq!(mask.get_pixel(0, 0)[0], 0);
    }
}
