//! Synthetic shelf images for the pipeline scenarios.

#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const OBJECT: Rgb<u8> = Rgb([20, 20, 20]);

pub fn blank_shelf(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, BACKGROUND))
}

/// Five well-separated filled circles of uniform size.
pub fn five_circles() -> DynamicImage {
    let mut img = RgbImage::from_pixel(500, 300, BACKGROUND);
    for i in 0..5 {
        let cx = 60 + i * 95;
        draw_filled_circle_mut(&mut img, (cx, 150), 20, OBJECT);
    }
    DynamicImage::ImageRgb8(img)
}

/// Four separated non-circular polygons: three rectangles and a triangle.
pub fn four_polygons() -> DynamicImage {
    let mut img = RgbImage::from_pixel(400, 300, BACKGROUND);

    fill_rect(&mut img, 30, 40, 50, 35);
    fill_rect(&mut img, 160, 50, 40, 60);
    fill_rect(&mut img, 290, 30, 60, 40);

    // Axis-aligned right triangle.
    for dy in 0..50u32 {
        for dx in 0..=dy {
            img.put_pixel(100 + dx, 180 + dy, OBJECT);
        }
    }

    DynamicImage::ImageRgb8(img)
}

/// Four separated rectangles, one of them clipped by the left image edge.
pub fn four_rects_one_clipped() -> DynamicImage {
    let mut img = RgbImage::from_pixel(400, 300, BACKGROUND);
    fill_rect(&mut img, 0, 60, 40, 50);
    fill_rect(&mut img, 120, 40, 50, 35);
    fill_rect(&mut img, 240, 50, 40, 60);
    fill_rect(&mut img, 150, 180, 60, 40);
    DynamicImage::ImageRgb8(img)
}

/// Six touching squares forming two horizontal blobs of three squares each.
pub fn six_touching_squares() -> DynamicImage {
    let mut img = RgbImage::from_pixel(400, 300, BACKGROUND);
    for row in 0..2u32 {
        for col in 0..3u32 {
            fill_rect(&mut img, 80 + col * 30, 60 + row * 120, 30, 30);
        }
    }
    DynamicImage::ImageRgb8(img)
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, width: u32, height: u32) {
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            img.put_pixel(x, y, OBJECT);
        }
    }
}
