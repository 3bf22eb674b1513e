//! Scene orchestration: configuration snapshots, atomic cloud swaps,
//! and per-frame advancement.

use crate::classifier::classify;
use crate::integrator::ParticleIntegrator;
use crate::loader::{CloudLoader, ConversionRequest};
use crate::palette::Palette;
use constants::animation::{DEFAULT_EXPANSION, DEFAULT_ROTATION_SPEED};
use constants::sampling::{DEFAULT_POINT_COUNT, DEFAULT_SCALE};
use point_cloud_convert::PointCloud;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Target shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Fibonacci sphere; the fallback and initial resting shape.
    #[default]
    Sphere,
    /// Point cloud sampled from the configured image.
    Image,
}

/// Configuration snapshot produced by the external control surface.
///
/// Owned by the caller and handed in whole; the scene never reads
/// ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub shape: ShapeKind,
    pub palette: Palette,
    /// Cloud spread and jitter control in 0..1.
    pub expansion: f32,
    /// Whole-cloud rotation speed, radians per second.
    pub rotation_speed: f32,
    /// Particle count N; fixed for the life of a running scene.
    pub count: usize,
    /// Conversion scale in scene units.
    pub scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Sphere,
            palette: Palette::default(),
            expansion: DEFAULT_EXPANSION,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            count: DEFAULT_POINT_COUNT,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Owns the live animation state and swaps in conversion results.
///
/// Drives one frame per [`ParticleScene::advance`] call: polls the
/// loader for a finished conversion, swaps the target cloud in as one
/// atomic unit, reclassifies colours when the cloud or palette
/// generation moved, then integrates the live buffer. Conversion runs
/// off the frame path, so a shape or image change never stalls
/// rendering; the previous live positions keep animating toward
/// whatever target is current.
pub struct ParticleScene {
    config: SceneConfig,
    image: Option<Arc<Vec<u8>>>,
    loader: CloudLoader,
    integrator: ParticleIntegrator,
    cloud: PointCloud,
    colours: Vec<f32>,
    cloud_generation: u64,
    palette_generation: u64,
    classified: (u64, u64),
    elapsed: f32,
    rng: StdRng,
}

impl ParticleScene {
    pub fn new(config: SceneConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests and reproducible renders.
    pub fn with_seed(config: SceneConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SceneConfig, mut rng: StdRng) -> Self {
        let cloud = PointCloud::sphere(config.count, config.scale);
        let colours = classify(&cloud, &config.palette, &mut rng);
        Self {
            integrator: ParticleIntegrator::new(config.count),
            loader: CloudLoader::new(),
            image: None,
            cloud,
            colours,
            cloud_generation: 1,
            palette_generation: 1,
            classified: (1, 1),
            elapsed: 0.0,
            rng,
            config,
        }
    }

    /// Apply a new configuration snapshot.
    ///
    /// Palette edits only bump the palette generation; shape, scale,
    /// or count changes retarget the cloud. A count change also
    /// reinitialises both the live buffer and the installed target to
    /// the resting sphere at the new count, since the buffer length is
    /// otherwise immutable and the two must stay index-aligned even
    /// while a conversion runs.
    pub fn set_config(&mut self, config: SceneConfig) {
        let palette_changed = config.palette != self.config.palette;
        let count_changed = config.count != self.config.count;
        let retarget = count_changed
            || config.shape != self.config.shape
            || config.scale != self.config.scale;

        self.config = config;

        if palette_changed {
            self.palette_generation += 1;
        }
        if count_changed {
            self.integrator.reset(self.config.count);
        }
        if retarget {
            self.retarget();
        }
    }

    /// Supply the source image and retarget if the image shape is active.
    pub fn set_image(&mut self, bytes: Vec<u8>) {
        self.image = Some(Arc::new(bytes));
        if self.config.shape == ShapeKind::Image {
            self.retarget();
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current target cloud.
    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Live positions for the rendering surface, flat xyz triples.
    pub fn positions(&self) -> &[f32] {
        self.integrator.positions()
    }

    /// Vertex colours, flat unit-range rgb triples, index-aligned with
    /// the positions.
    pub fn colours(&self) -> &[f32] {
        &self.colours
    }

    /// Whole-cloud rotation angle for the renderer's rigid transform.
    pub fn rotation(&self) -> f32 {
        self.integrator.rotation()
    }

    /// Whether a conversion is still running in the background.
    pub fn is_converting(&self) -> bool {
        self.loader.in_flight()
    }

    /// Advance the scene by one frame of `delta` seconds and return the
    /// new rotation angle.
    pub fn advance(&mut self, delta: f32) -> f32 {
        if let Some(cloud) = self.loader.poll() {
            // A result sized for a superseded count is stale even if it
            // won the generation race.
            if cloud.len() == self.config.count {
                self.install_cloud(cloud);
            } else {
                log::debug!("dropping conversion sized {} for count {}", cloud.len(), self.config.count);
            }
        }

        if self.classified != (self.cloud_generation, self.palette_generation) {
            self.colours = classify(&self.cloud, &self.config.palette, &mut self.rng);
            self.classified = (self.cloud_generation, self.palette_generation);
        }

        self.elapsed += delta;
        self.integrator.update(
            &self.cloud.positions,
            delta,
            self.config.expansion,
            self.config.rotation_speed,
            self.elapsed,
        )
    }

    /// Replace the target cloud for the active shape selection.
    fn retarget(&mut self) {
        match self.config.shape {
            ShapeKind::Sphere => {
                // Discard any conversion still running for the image
                // shape; its result must not land on a sphere scene.
                self.loader.cancel();
                let cloud = PointCloud::sphere(self.config.count, self.config.scale);
                self.install_cloud(cloud);
            }
            ShapeKind::Image => match self.image.clone() {
                Some(bytes) => {
                    // A count change leaves the installed target at the
                    // old length; rest on a sphere at the new count so
                    // target and live buffer never disagree while the
                    // conversion runs.
                    if self.cloud.len() != self.config.count {
                        let cloud = PointCloud::sphere(self.config.count, self.config.scale);
                        self.install_cloud(cloud);
                    }
                    self.loader.request(ConversionRequest {
                        bytes,
                        count: self.config.count,
                        scale: self.config.scale,
                    });
                }
                None => {
                    // No image supplied yet; rest on the sphere until
                    // one arrives.
                    self.loader.cancel();
                    let cloud = PointCloud::sphere(self.config.count, self.config.scale);
                    self.install_cloud(cloud);
                }
            },
        }
    }

    /// Swap the target cloud in as one atomic unit. The live buffer is
    /// untouched, so the morph starts from wherever particles are now.
    fn install_cloud(&mut self, cloud: PointCloud) {
        self.cloud = cloud;
        self.cloud_generation += 1;
    }
}
