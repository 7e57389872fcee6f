use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::models::BoundingBox;

/// Outer contours of a binary mask, in original image coordinates.
///
/// The boundary tracer ignores foreground that touches the image frame, so
/// the mask is padded with a one-pixel background border before tracing and
/// the points are shifted back afterwards. Blobs clipped by the frame are
/// therefore counted like any other blob.
pub(crate) fn outer_contours(mask: &GrayImage) -> Vec<Contour<i32>> {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    for (x, y, pixel) in mask.enumerate_pixels() {
        padded.put_pixel(x + 1, y + 1, *pixel);
    }

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|mut c| {
            // The padding border is background, so every traced point sits
            // at 1 or more and the shift cannot go negative.
            for p in &mut c.points {
                p.x -= 1;
                p.y -= 1;
            }
            c
        })
        .collect()
}

/// Find the outer contours of a binary mask and reduce each to its
/// axis-aligned bounding box.
///
/// Only outermost boundaries are kept; nested hole contours are discarded,
/// so this yields one box per visually separate blob, not per nested hole.
pub fn outer_regions(mask: &GrayImage) -> Vec<BoundingBox> {
    outer_contours(mask)
        .into_iter()
        .filter_map(|c| BoundingBox::enclosing(&c.points))
        .collect()
}

/// Count 8-connected foreground components, excluding the background.
///
/// Labels are contiguous starting at 1, so the region count is the largest
/// label in the map.
pub fn component_count(mask: &GrayImage) -> u32 {
    let labeled = connected_components(mask, Connectivity::Eight, Luma([0u8]));
    labeled.pixels().map(|p| p[0]).max().unwrap_or(0)
}
