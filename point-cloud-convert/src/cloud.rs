//! Point cloud data model shared by the converter and the runtime.

use crate::sphere::generate_sphere;

/// Origin of a cloud's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudSource {
    /// Procedural fallback distribution; shading attributes are neutral.
    Procedural,
    /// Sampled from a raster image; shading attributes are meaningful.
    Image,
}

/// Fixed-size particle target set with per-particle shading attributes.
///
/// All attribute arrays share index `i` -> same particle. `positions`
/// holds xyz triples, so its length is `3 * len()`. A cloud is replaced
/// wholesale on shape or image changes, never patched in place.
#[derive(Debug, Clone)]
pub struct PointCloud {
    /// Target positions in scene units, flat xyz triples.
    pub positions: Vec<f32>,
    /// Normalised brightness in 0..1.
    pub brightness: Vec<f32>,
    /// Edge strength in 0..1.
    pub edge_strength: Vec<f32>,
    /// Whether the particle was classified as backdrop.
    pub is_background: Vec<bool>,
    pub source: CloudSource,
}

impl PointCloud {
    /// Procedural sphere cloud with neutral shading attributes.
    pub fn sphere(count: usize, radius: f32) -> Self {
        Self {
            positions: generate_sphere(count, radius),
            brightness: vec![0.0; count],
            edge_strength: vec![0.0; count],
            is_background: vec![false; count],
            source: CloudSource::Procedural,
        }
    }

    /// Particle count.
    pub fn len(&self) -> usize {
        self.brightness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty()
    }
}
