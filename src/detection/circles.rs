use image::DynamicImage;
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::config::CircleConfig;
use crate::detection::preprocessing;

/// A circle found by the Hough search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedCircle {
    pub x: u32,
    pub y: u32,
    pub radius: u32,
    /// Accumulator votes the center received.
    pub votes: u32,
}

/// Gradient-guided Hough circle search on a blurred grayscale copy of the
/// raw image. Independent of the binary mask.
///
/// Edge pixels vote for center candidates along their gradient direction over
/// the configured radius range. Candidates must reach the accumulator
/// threshold, be local vote maxima, and keep the configured minimum distance
/// from stronger accepted centers; each survivor is then verified against a
/// radius histogram so straight edges and smeared vote trails do not pass as
/// circles. An empty result is a valid count of zero, not an error.
pub fn detect_circles(img: &DynamicImage, config: &CircleConfig) -> Vec<DetectedCircle> {
    let gray = preprocessing::to_grayscale(img);
    let blurred = preprocessing::apply_blur(&gray, config.blur_sigma);
    let edges = canny(&blurred, config.edge_threshold / 2.0, config.edge_threshold);

    let gx = horizontal_sobel(&blurred);
    let gy = vertical_sobel(&blurred);

    let (width, height) = (edges.width(), edges.height());
    let mut edge_points: Vec<(u32, u32)> = Vec::new();
    let mut accumulator = vec![0u32; (width * height) as usize];

    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        let dx = gx.get_pixel(x, y)[0] as f32;
        let dy = gy.get_pixel(x, y)[0] as f32;
        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude < f32::EPSILON {
            continue;
        }
        edge_points.push((x, y));

        let (ux, uy) = (dx / magnitude, dy / magnitude);
        for radius in config.min_radius..=config.max_radius {
            let r = radius as f32;
            // The center lies along the gradient line, on either side.
            for (cx, cy) in [
                (x as f32 + r * ux, y as f32 + r * uy),
                (x as f32 - r * ux, y as f32 - r * uy),
            ] {
                let (cx, cy) = (cx.round(), cy.round());
                if cx >= 0.0 && cy >= 0.0 && (cx as u32) < width && (cy as u32) < height {
                    accumulator[(cy as u32 * width + cx as u32) as usize] += 1;
                }
            }
        }
    }

    let candidates = center_candidates(&accumulator, width, height, config);
    candidates
        .into_iter()
        .filter_map(|(x, y, votes)| {
            best_radius(x, y, &edge_points, config).map(|radius| DetectedCircle {
                x,
                y,
                radius,
                votes,
            })
        })
        .collect()
}

/// Accumulator cells that reach the vote threshold and are local maxima,
/// thinned so no two survivors are closer than the minimum center distance.
/// Returned strongest-first.
fn center_candidates(
    accumulator: &[u32],
    width: u32,
    height: u32,
    config: &CircleConfig,
) -> Vec<(u32, u32, u32)> {
    let votes_at = |x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            0
        } else {
            accumulator[(y as u32 * width + x as u32) as usize]
        }
    };

    let mut peaks: Vec<(u32, u32, u32)> = Vec::new();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let votes = votes_at(x, y);
            if votes < config.accumulator_threshold {
                continue;
            }
            if votes >= votes_at(x - 1, y)
                && votes >= votes_at(x + 1, y)
                && votes >= votes_at(x, y - 1)
                && votes >= votes_at(x, y + 1)
            {
                peaks.push((x as u32, y as u32, votes));
            }
        }
    }

    peaks.sort_unstable_by(|a, b| b.2.cmp(&a.2));

    let min_dist_sq = (config.min_center_distance * config.min_center_distance) as i64;
    let mut accepted: Vec<(u32, u32, u32)> = Vec::new();
    for (x, y, votes) in peaks {
        let far_enough = accepted.iter().all(|&(ax, ay, _)| {
            let dx = x as i64 - ax as i64;
            let dy = y as i64 - ay as i64;
            dx * dx + dy * dy >= min_dist_sq
        });
        if far_enough {
            accepted.push((x, y, votes));
        }
    }
    accepted
}

/// Radius with the strongest edge support at a candidate center, or `None`
/// when no radius in range gathers enough supporting edge pixels.
fn best_radius(cx: u32, cy: u32, edge_points: &[(u32, u32)], config: &CircleConfig) -> Option<u32> {
    let mut histogram = vec![0u32; (config.max_radius + 2) as usize];
    for &(x, y) in edge_points {
        let dx = x as f32 - cx as f32;
        let dy = y as f32 - cy as f32;
        let r = (dx * dx + dy * dy).sqrt().round() as u32;
        if r >= config.min_radius && r <= config.max_radius {
            histogram[r as usize] += 1;
        }
    }

    let mut best: Option<(u32, u32)> = None;
    for r in config.min_radius..=config.max_radius {
        // A one-pixel band on either side absorbs rounding of the trace.
        let support = histogram[r.saturating_sub(1) as usize]
            + histogram[r as usize]
            + histogram[(r + 1) as usize];
        if support >= config.accumulator_threshold
            && best.is_none_or(|(_, best_support)| support > best_support)
        {
            best = Some((r, support));
        }
    }
    best.map(|(r, _)| r)
}
