use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::BoundingBox;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const STROKE_WIDTH: u32 = 2;

/// Draw a rectangle around every region onto a copy of the raw image.
///
/// A visualization aid only: the boxes come from the contour pass regardless
/// of which method's count was ultimately trusted.
pub fn draw_regions(img: &DynamicImage, regions: &[BoundingBox]) -> RgbImage {
    let mut annotated = img.to_rgb8();
    for region in regions {
        draw_box(&mut annotated, region);
    }
    annotated
}

fn draw_box(canvas: &mut RgbImage, region: &BoundingBox) {
    for inset in 0..STROKE_WIDTH {
        let width = region.width.saturating_sub(2 * inset);
        let height = region.height.saturating_sub(2 * inset);
        if width == 0 || height == 0 {
            break;
        }
        let rect = Rect::at((region.x + inset) as i32, (region.y + inset) as i32)
            .of_size(width, height);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}
