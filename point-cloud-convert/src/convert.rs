//! Conversion pipeline entry point with sphere fallback.

use crate::cloud::PointCloud;
use crate::sampler::sample_image;
use crate::segmentation::analyze_background;
use constants::segmentation::WORKING_WIDTH;
use image::RgbaImage;
use image::imageops::FilterType;
use rand::Rng;

/// Convert encoded image bytes into a particle target set of exactly
/// `count` particles at the given scene scale.
///
/// Never fails by contract: decode errors and fully transparent images
/// degrade to the Fibonacci sphere fallback of the same length, so the
/// caller always receives a renderable cloud.
pub fn convert_image<R: Rng>(bytes: &[u8], count: usize, scale: f32, rng: &mut R) -> PointCloud {
    let image = match decode_working_image(bytes) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("image decode failed ({err}); using sphere fallback");
            return PointCloud::sphere(count, scale);
        }
    };

    let background = analyze_background(&image);
    match sample_image(&image, &background, count, scale, rng) {
        Some(cloud) => cloud,
        None => {
            log::warn!("image has no opaque pixels; using sphere fallback");
            PointCloud::sphere(count, scale)
        }
    }
}

/// Decode and resample to the fixed working width, preserving aspect.
fn decode_working_image(bytes: &[u8]) -> Result<RgbaImage, Box<dyn std::error::Error>> {
    let decoded = image::load_from_memory(bytes)?;
    let height = ((decoded.height() as f32 / decoded.width() as f32) * WORKING_WIDTH as f32)
        .round()
        .max(1.0) as u32;
    let resized = decoded.resize_exact(WORKING_WIDTH, height, FilterType::Triangle);
    Ok(resized.to_rgba8())
}
