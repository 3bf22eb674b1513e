//! Per-frame particle position integration.

use constants::animation::{LERP_RATE, NOISE_AMPLITUDE, VISUAL_SCALE_BASE, VISUAL_SCALE_SPAN};
use constants::sampling::DEFAULT_SCALE;
use point_cloud_convert::generate_sphere;

/// Owns the live particle positions and the whole-cloud rotation angle.
///
/// The live buffer persists across target cloud replacements so a
/// shape change morphs smoothly instead of jump cutting. Its length is
/// fixed for the life of a scene at a given particle count; a count
/// change requires [`ParticleIntegrator::reset`] before the next
/// update.
#[derive(Debug, Clone)]
pub struct ParticleIntegrator {
    positions: Vec<f32>,
    rotation: f32,
}

impl ParticleIntegrator {
    /// Create an integrator resting on the fallback sphere.
    pub fn new(count: usize) -> Self {
        Self {
            positions: generate_sphere(count, DEFAULT_SCALE),
            rotation: 0.0,
        }
    }

    /// Particle count.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Live position buffer for the rendering surface, flat xyz triples.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Current whole-cloud rotation angle in radians. The rigid
    /// rotation is applied at render time, never baked into positions.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Reinitialise the live buffer to the fallback sphere for a new
    /// particle count.
    pub fn reset(&mut self, count: usize) {
        self.positions = generate_sphere(count, DEFAULT_SCALE);
    }

    /// Advance every particle toward its target for one frame.
    ///
    /// Scales targets by the expansion-driven visual scale, adds a
    /// small sinusoidal jitter proportional to expansion, then applies
    /// first-order exponential smoothing toward the result. `delta` is
    /// the frame time in seconds and `elapsed` the wall-clock scene
    /// time driving the jitter phase. Returns the new rotation angle.
    ///
    /// Hot path: runs once per rendered frame over the whole buffer,
    /// no allocation.
    pub fn update(
        &mut self,
        targets: &[f32],
        delta: f32,
        expansion: f32,
        rotation_speed: f32,
        elapsed: f32,
    ) -> f32 {
        debug_assert_eq!(targets.len(), self.positions.len());

        // Clamped so large frame deltas settle on the target instead of
        // oscillating past it (the unclamped rate overshoots above 1/3 s).
        let lerp = (LERP_RATE * delta).min(1.0);
        let visual_scale = VISUAL_SCALE_BASE + expansion * VISUAL_SCALE_SPAN;
        let count = self.positions.len().min(targets.len()) / 3;

        for i in 0..count {
            let i3 = i * 3;
            let mut tx = targets[i3] * visual_scale;
            let mut ty = targets[i3 + 1] * visual_scale;
            let tz = targets[i3 + 2] * visual_scale;

            // Non-physical noise, purely for a living look. The y
            // phase deliberately reads the already-jittered x.
            tx += (elapsed + ty).sin() * NOISE_AMPLITUDE * expansion;
            ty += (elapsed + tx).cos() * NOISE_AMPLITUDE * expansion;

            self.positions[i3] += (tx - self.positions[i3]) * lerp;
            self.positions[i3 + 1] += (ty - self.positions[i3 + 1]) * lerp;
            self.positions[i3 + 2] += (tz - self.positions[i3 + 2]) * lerp;
        }

        self.rotation += rotation_speed * delta;
        self.rotation
    }
}
