use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;

use crate::config::EmptySpaceConfig;
use crate::detection::{annotate, contours, preprocessing};
use crate::error::CountError;
use crate::models::EmptySpaceResult;

/// Sibling pipeline that counts unoccupied regions instead of objects.
///
/// The occupied-area mask is built from filled outer contours, merged with a
/// generous closing, then inverted; each outer contour of the inverted mask
/// becomes one counted empty region. Shares no state with the object counter.
pub struct EmptySpaceDetector {
    pub config: EmptySpaceConfig,
    pub verbose: bool,
}

impl EmptySpaceDetector {
    pub fn new() -> Self {
        Self {
            config: EmptySpaceConfig::default(),
            verbose: false,
        }
    }

    pub fn with_config(mut self, config: EmptySpaceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Count the empty regions of an image and annotate them.
    pub fn detect(&self, img: &DynamicImage) -> Result<EmptySpaceResult, CountError> {
        if img.width() == 0 || img.height() == 0 {
            return Err(CountError::ProcessingFailed(
                "input image has zero width or height".into(),
            ));
        }

        if self.verbose {
            println!("Building occupied-area mask...");
        }
        let occupied = occupied_mask(img, &self.config);

        let mut empty = occupied;
        preprocessing::invert_mask(&mut empty);

        if self.verbose {
            println!("Extracting empty regions...");
        }
        let regions = contours::outer_regions(&empty);

        if self.verbose {
            println!("Found {} empty regions", regions.len());
        }

        Ok(EmptySpaceResult {
            count: regions.len() as u32,
            annotated: annotate::draw_regions(img, &regions),
            regions,
        })
    }
}

impl Default for EmptySpaceDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Binary mask of the occupied area: adaptive threshold, outer contours
/// filled solid, then a closing that merges nearby occupied regions.
pub(crate) fn occupied_mask(img: &DynamicImage, config: &EmptySpaceConfig) -> GrayImage {
    let gray = preprocessing::to_grayscale(img);
    let thresholded = preprocessing::adaptive_threshold_inv(
        &gray,
        config.threshold_window,
        config.threshold_constant,
    );

    let mut filled = GrayImage::new(gray.width(), gray.height());
    for contour in contours::outer_contours(&thresholded) {
        let mut points = contour.points;
        // draw_polygon_mut rejects a closed point list.
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        match points.len() {
            0 => {}
            1 | 2 => {
                for p in &points {
                    filled.put_pixel(p.x as u32, p.y as u32, Luma([255]));
                }
            }
            _ => draw_polygon_mut(&mut filled, &points, Luma([255])),
        }
    }

    preprocessing::morphological_close(&filled, config.closing_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn shelf_with_bar(bar_x: u32, bar_width: u32) -> DynamicImage {
        let mut img = RgbImage::from_pixel(200, 100, Rgb([255; 3]));
        for y in 0..100 {
            for x in bar_x..bar_x + bar_width {
                img.put_pixel(x, y, Rgb([20; 3]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn empty_mask_is_the_complement_of_the_occupied_mask() {
        let img = shelf_with_bar(90, 15);
        let config = EmptySpaceConfig::default();
        let occupied = occupied_mask(&img, &config);
        let mut empty = occupied.clone();
        preprocessing::invert_mask(&mut empty);

        for (o, e) in occupied.pixels().zip(empty.pixels()) {
            assert_eq!(o[0] as u16 + e[0] as u16, 255);
        }
    }

    #[test]
    fn full_height_bar_splits_the_shelf_into_two_empty_regions() {
        let result = EmptySpaceDetector::new().detect(&shelf_with_bar(90, 15)).unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(result.regions.len(), 2);
        assert_eq!(result.annotated.dimensions(), (200, 100));
    }

    #[test]
    fn blank_shelf_is_one_big_empty_region() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(160, 80, Rgb([255; 3])));
        let result = EmptySpaceDetector::new().detect(&img).unwrap();
        assert_eq!(result.count, 1);
    }

    #[test]
    fn detection_is_deterministic() {
        let img = shelf_with_bar(60, 20);
        let detector = EmptySpaceDetector::new();
        let a = detector.detect(&img).unwrap();
        let b = detector.detect(&img).unwrap();
        assert_eq!(a.count, b.count);
        assert_eq!(a.regions, b.regions);
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            EmptySpaceDetector::new().detect(&img),
            Err(CountError::ProcessingFailed(_))
        ));
    }
}
