//! Histogram-based background colour detection.
//!
//! Subjects are assumed roughly centred, so colours that show up
//! disproportionately near the frame edges are treated as backdrop
//! regardless of hue. This tolerates noisy and gradient backgrounds
//! better than a single chroma-key colour.

use constants::segmentation::{
    BACKGROUND_OUTER_RATIO, HISTOGRAM_STRIDE, OUTER_ZONE_RADIUS_SQ, QUANTIZE_SHIFT,
    SEGMENTATION_ALPHA_MIN,
};
use image::RgbaImage;
use std::collections::{HashMap, HashSet};

/// Quantised colour bucket key, 4 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColourKey(u16);

impl ColourKey {
    /// Quantise an 8-bit RGB triple into its coarse bucket.
    pub fn quantize(r: u8, g: u8, b: u8) -> Self {
        let r = (r >> QUANTIZE_SHIFT) as u16;
        let g = (g >> QUANTIZE_SHIFT) as u16;
        let b = (b >> QUANTIZE_SHIFT) as u16;
        Self(r << 8 | g << 4 | b)
    }
}

/// Per-bucket occupancy gathered during the histogram pass.
#[derive(Debug, Default)]
struct BucketStats {
    total: u32,
    outer: u32,
}

/// Set of colour buckets classified as backdrop.
#[derive(Debug, Clone, Default)]
pub struct BackgroundColours {
    keys: HashSet<ColourKey>,
}

impl BackgroundColours {
    pub fn contains(&self, key: ColourKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Whether an image coordinate falls in the radial outer zone.
/// Normalised coordinates run -1..1 on both axes, independent of aspect.
fn is_outer_zone(x: u32, y: u32, width: u32, height: u32) -> bool {
    let nx = (x as f32 / width as f32 - 0.5) * 2.0;
    let ny = (y as f32 / height as f32 - 0.5) * 2.0;
    nx * nx + ny * ny > OUTER_ZONE_RADIUS_SQ
}

/// Classify colour buckets as backdrop by their outer-zone occupancy.
///
/// Samples the image on a coarse grid, builds a quantised colour
/// histogram, and flags buckets whose outer/total ratio exceeds the
/// configured threshold. Deterministic for a given image.
pub fn analyze_background(image: &RgbaImage) -> BackgroundColours {
    let (width, height) = image.dimensions();
    let mut stats: HashMap<ColourKey, BucketStats> = HashMap::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let px = image.get_pixel(x, y);
            if px[3] >= SEGMENTATION_ALPHA_MIN {
                let entry = stats.entry(ColourKey::quantize(px[0], px[1], px[2])).or_default();
                entry.total += 1;
                if is_outer_zone(x, y, width, height) {
                    entry.outer += 1;
                }
            }
            x += HISTOGRAM_STRIDE;
        }
        y += HISTOGRAM_STRIDE;
    }

    let bucket_count = stats.len();
    let keys: HashSet<ColourKey> = stats
        .into_iter()
        .filter(|(_, s)| s.outer as f32 / s.total as f32 > BACKGROUND_OUTER_RATIO)
        .map(|(key, _)| key)
        .collect();

    log::debug!(
        "segmentation: {} of {} colour buckets classified as backdrop",
        keys.len(),
        bucket_count
    );

    BackgroundColours { keys }
}
