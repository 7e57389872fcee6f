use std::cmp::Reverse;
use std::collections::BinaryHeap;

use image::{DynamicImage, GrayImage, Luma};
use imageproc::distance_transform::euclidean_squared_distance_transform;
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::detection::preprocessing;

/// Split touching foreground blobs and count the separated objects.
///
/// Seeds are taken where the distance to the background exceeds half of the
/// maximum distance ("sure foreground"), labeled, and offset by +1 so the
/// definite background carries label 1 and no marker is 0. The remaining
/// "unknown" band between seeds and background is flooded from the markers in
/// ascending grayscale-intensity order; the count is the maximum resulting
/// label minus one, correcting for the background label.
///
/// The most expensive and most failure-prone estimator: it degenerates to
/// near-zero or over-segments on noisy masks, so callers only invoke it when
/// the cheap estimators disagree.
pub fn separate(img: &DynamicImage, mask: &GrayImage) -> u32 {
    let (width, height) = mask.dimensions();

    // Distance of each foreground pixel to the nearest background pixel,
    // computed as the distance transform of the inverted mask.
    let mut inverted = mask.clone();
    preprocessing::invert_mask(&mut inverted);
    let squared_distances = euclidean_squared_distance_transform(&inverted);

    let max_squared = squared_distances
        .pixels()
        .map(|p| p[0])
        .fold(0.0f64, f64::max);
    // An empty mask has maximum distance 0; thresholding against half of it
    // would mark everything as a seed, so bail out with a zero count.
    if max_squared == 0.0 || !max_squared.is_finite() {
        return 0;
    }

    let seed_threshold = 0.5 * max_squared.sqrt();
    let mut sure_fg = GrayImage::new(width, height);
    for (x, y, pixel) in sure_fg.enumerate_pixels_mut() {
        if squared_distances.get_pixel(x, y)[0].sqrt() > seed_threshold {
            *pixel = Luma([255]);
        }
    }

    let seed_labels = connected_components(&sure_fg, Connectivity::Eight, Luma([0u8]));

    // Markers: seeds keep their label shifted by +1, definite background
    // becomes 1, the unknown band (foreground that is not a seed) stays 0.
    let mut markers = vec![0u32; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let seed = seed_labels.get_pixel(x, y)[0];
            if seed > 0 {
                markers[idx] = seed + 1;
            } else if mask.get_pixel(x, y)[0] == 0 {
                markers[idx] = 1;
            }
        }
    }

    flood(&mut markers, &preprocessing::to_grayscale(img), width, height);

    markers.iter().copied().max().unwrap_or(0).saturating_sub(1)
}

/// Meyer flooding: grow every marked basin into the unmarked pixels, always
/// expanding at the lowest grayscale intensity first.
fn flood(markers: &mut [u32], intensity: &GrayImage, width: u32, height: u32) {
    let neighbors = |x: u32, y: u32| {
        let mut out = [(0u32, 0u32); 4];
        let mut n = 0;
        if x > 0 {
            out[n] = (x - 1, y);
            n += 1;
        }
        if y > 0 {
            out[n] = (x, y - 1);
            n += 1;
        }
        if x + 1 < width {
            out[n] = (x + 1, y);
            n += 1;
        }
        if y + 1 < height {
            out[n] = (x, y + 1);
            n += 1;
        }
        (out, n)
    };

    // Min-heap ordered by intensity, with an insertion sequence number so
    // equal intensities flood first-come-first-served.
    let mut queue: BinaryHeap<(Reverse<u8>, Reverse<u64>, u32, u32, u32)> = BinaryHeap::new();
    let mut sequence = 0u64;

    for y in 0..height {
        for x in 0..width {
            let label = markers[(y * width + x) as usize];
            if label == 0 {
                continue;
            }
            let (candidates, n) = neighbors(x, y);
            for &(nx, ny) in &candidates[..n] {
                if markers[(ny * width + nx) as usize] == 0 {
                    queue.push((
                        Reverse(intensity.get_pixel(nx, ny)[0]),
                        Reverse(sequence),
                        nx,
                        ny,
                        label,
                    ));
                    sequence += 1;
                }
            }
        }
    }

    while let Some((_, _, x, y, label)) = queue.pop() {
        let idx = (y * width + x) as usize;
        if markers[idx] != 0 {
            continue;
        }
        markers[idx] = label;

        let (candidates, n) = neighbors(x, y);
        for &(nx, ny) in &candidates[..n] {
            if markers[(ny * width + nx) as usize] == 0 {
                queue.push((
                    Reverse(intensity.get_pixel(nx, ny)[0]),
                    Reverse(sequence),
                    nx,
                    ny,
                    label,
                ));
                sequence += 1;
            }
        }
    }
}
