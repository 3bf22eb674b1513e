//! Importance-ranked pixel sampling and coordinate mapping.

use crate::cloud::{CloudSource, PointCloud};
use crate::segmentation::{BackgroundColours, ColourKey};
use constants::sampling::{
    BACKGROUND_EDGE_MAX, CANDIDATE_ALPHA_MIN, DEPTH_BACKGROUND_BASE, DEPTH_BACKGROUND_BRIGHTNESS,
    DEPTH_BRIGHTNESS_SPAN, DEPTH_EDGE_BUMP, DEPTH_FOREGROUND_LIFT, EDGE_IMPORTANCE_GATE,
    EDGE_IMPORTANCE_WEIGHT, EDGE_MAGNITUDE_FULL, FOREGROUND_IMPORTANCE_BONUS, PADDING_JITTER,
    RANDOM_IMPORTANCE_SPAN, SCANLINE_COUNT,
};
use image::RgbaImage;
use rand::Rng;
use rayon::prelude::*;
use std::cmp::Ordering;

/// One accepted pixel awaiting importance ranking.
#[derive(Debug, Clone)]
struct Candidate {
    x: f32,
    y: f32,
    brightness: f32,
    edge_strength: f32,
    importance: f32,
    is_background: bool,
}

/// Mean-channel luminance at a pixel; out-of-bounds reads as 0.
fn luminance(image: &RgbaImage, x: i64, y: i64) -> f32 {
    let (width, height) = image.dimensions();
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return 0.0;
    }
    let px = image.get_pixel(x as u32, y as u32);
    (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0
}

/// Sample an image into a fixed-size particle target set.
///
/// Scans every sufficiently opaque pixel, ranks candidates by
/// importance (random base, strong edge and foreground boosts), keeps
/// the top `count`, pads with jittered duplicates when the image cannot
/// supply enough pixels, and maps the survivors into normalised scene
/// coordinates with brightness-derived depth.
///
/// Returns `None` when the image has no opaque pixels at all; the
/// caller substitutes the sphere fallback.
pub fn sample_image<R: Rng>(
    image: &RgbaImage,
    background: &BackgroundColours,
    count: usize,
    scale: f32,
    rng: &mut R,
) -> Option<PointCloud> {
    let (width, height) = image.dimensions();

    // Parallel scan. Per-row vectors are flattened in row order so the
    // candidate sequence is independent of thread scheduling.
    let rows: Vec<Vec<Candidate>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::new();
            for x in 0..width {
                let px = image.get_pixel(x, y);
                if px[3] <= CANDIDATE_ALPHA_MIN {
                    continue;
                }

                let brightness = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;

                // Central-difference gradient of local luminance.
                let gx = luminance(image, x as i64 + 1, y as i64)
                    - luminance(image, x as i64 - 1, y as i64);
                let gy = luminance(image, x as i64, y as i64 + 1)
                    - luminance(image, x as i64, y as i64 - 1);
                let edge_strength = ((gx * gx + gy * gy).sqrt() / EDGE_MAGNITUDE_FULL).min(1.0);

                // A backdrop-coloured pixel on a hard edge stays
                // foreground so outlines matching the backdrop hue survive.
                let key = ColourKey::quantize(px[0], px[1], px[2]);
                let is_background = background.contains(key) && edge_strength < BACKGROUND_EDGE_MAX;

                let mut importance = 0.0;
                if edge_strength > EDGE_IMPORTANCE_GATE {
                    importance += edge_strength * EDGE_IMPORTANCE_WEIGHT;
                }
                if !is_background {
                    importance += FOREGROUND_IMPORTANCE_BONUS;
                }

                row.push(Candidate {
                    x: x as f32,
                    y: y as f32,
                    brightness,
                    edge_strength,
                    importance,
                    is_background,
                });
            }
            row
        })
        .collect();

    let mut candidates: Vec<Candidate> = rows.into_iter().flatten().collect();
    if candidates.is_empty() {
        return None;
    }

    // Brightness range over every accepted pixel, for depth normalisation.
    let mut min_b = f32::MAX;
    let mut max_b = f32::MIN;
    for c in &candidates {
        min_b = min_b.min(c.brightness);
        max_b = max_b.max(c.brightness);
    }

    // Stochastic tie-breaking keeps two renders of the same image from
    // being pixel-identical and lets some backdrop texture through.
    // Applied serially, after the parallel scan, so a seeded generator
    // produces reproducible output.
    for c in &mut candidates {
        c.importance += rng.random_range(0.0..RANDOM_IMPORTANCE_SPAN);
    }

    candidates.par_sort_unstable_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(count);

    // Cycle through the selected set when the image cannot supply
    // enough pixels; duplicates get a sub-pixel jitter so they are not
    // coincident.
    let selected_len = candidates.len();
    let mut cycle = 0usize;
    while candidates.len() < count {
        let mut copy = candidates[cycle % selected_len].clone();
        copy.x += rng.random_range(-PADDING_JITTER..PADDING_JITTER);
        copy.y += rng.random_range(-PADDING_JITTER..PADDING_JITTER);
        candidates.push(copy);
        cycle += 1;
    }

    log::debug!(
        "sampler: {} candidates selected ({} padded) from {}x{}",
        candidates.len(),
        count.saturating_sub(selected_len),
        width,
        height
    );

    Some(map_to_cloud(&candidates, width, height, min_b, max_b, scale))
}

/// Map ranked candidates into normalised scene coordinates.
fn map_to_cloud(
    candidates: &[Candidate],
    width: u32,
    height: u32,
    min_b: f32,
    max_b: f32,
    scale: f32,
) -> PointCloud {
    let count = candidates.len();
    let mut positions = vec![0.0f32; count * 3];
    let mut brightness = vec![0.0f32; count];
    let mut edge_strength = vec![0.0f32; count];
    let mut is_background = vec![false; count];

    let aspect = width as f32 / height as f32;
    // Guard against a flat-colour image collapsing the range.
    let range = if max_b > min_b { max_b - min_b } else { 1.0 };

    for (i, c) in candidates.iter().enumerate() {
        let mut nx = (c.x / width as f32 - 0.5) * 2.0;
        let mut ny = -(c.y / height as f32 - 0.5) * 2.0;

        // Aspect correction, then quantise y to fixed scanlines for the
        // deliberate scanline artifact.
        nx *= aspect;
        ny = (ny * SCANLINE_COUNT).floor() / SCANLINE_COUNT;

        positions[i * 3] = nx * scale * 2.0;
        positions[i * 3 + 1] = ny * scale * 2.0;

        // Backdrop recedes sharply; brighter and edgier foreground
        // pixels sit closer to the viewer.
        let norm_b = (c.brightness - min_b) / range;
        let z = if c.is_background {
            DEPTH_BACKGROUND_BASE * scale + norm_b * DEPTH_BACKGROUND_BRIGHTNESS
        } else {
            norm_b * DEPTH_BRIGHTNESS_SPAN * scale + DEPTH_FOREGROUND_LIFT * scale
        };
        positions[i * 3 + 2] = z + c.edge_strength * DEPTH_EDGE_BUMP * scale;

        brightness[i] = norm_b;
        edge_strength[i] = c.edge_strength;
        is_background[i] = c.is_background;
    }

    PointCloud {
        positions,
        brightness,
        edge_strength,
        is_background,
        source: CloudSource::Image,
    }
}
