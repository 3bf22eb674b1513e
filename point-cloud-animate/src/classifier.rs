//! Per-particle shade role classification and colour resolution.

use crate::palette::{Palette, ShadeRole};
use constants::shading::{DETAIL_BRIGHTNESS_MIN, DETAIL_EDGE_THRESHOLD, SHADOW_BRIGHTNESS_MAX};
use point_cloud_convert::cloud::{CloudSource, PointCloud};
use rand::Rng;

/// Classify one particle's attributes into a shade role.
///
/// Backdrop is always shadow; hard edges become detail regardless of
/// brightness; the remaining body fill splits on the brightness
/// thresholds, with a wide midtone band to avoid splotchy gradients.
pub fn classify_particle(brightness: f32, edge_strength: f32, is_background: bool) -> ShadeRole {
    if is_background {
        ShadeRole::Shadow
    } else if edge_strength > DETAIL_EDGE_THRESHOLD {
        ShadeRole::Detail
    } else if brightness < SHADOW_BRIGHTNESS_MAX {
        ShadeRole::Shadow
    } else if brightness > DETAIL_BRIGHTNESS_MIN {
        ShadeRole::Detail
    } else {
        ShadeRole::Midtone
    }
}

/// Build the vertex colour buffer for a cloud under the given palette.
///
/// Image-derived clouds classify every particle from its attributes,
/// so the result is a pure function of cloud and palette. Procedural
/// clouds assign roles uniformly at random from the palette instead.
/// Returns flat unit-range rgb triples, index-aligned with the cloud.
pub fn classify<R: Rng>(cloud: &PointCloud, palette: &Palette, rng: &mut R) -> Vec<f32> {
    let roles = palette.roles();
    let mut colours = Vec::with_capacity(cloud.len() * 3);

    for i in 0..cloud.len() {
        let rgb = match cloud.source {
            CloudSource::Image => palette.resolve(classify_particle(
                cloud.brightness[i],
                cloud.edge_strength[i],
                cloud.is_background[i],
            )),
            CloudSource::Procedural => roles[rng.random_range(0..roles.len())],
        };
        colours.extend_from_slice(&rgb.to_unit());
    }

    colours
}
