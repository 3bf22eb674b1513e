//! Real-time particle animation over image-derived point clouds.
//!
//! Owns the live position buffer, blends it toward the current target
//! cloud every frame, and derives vertex colours from the per-particle
//! shading classification. Conversions run off the frame loop and are
//! swapped in atomically, last request wins.

pub mod classifier;
pub mod integrator;
pub mod loader;
pub mod palette;
pub mod scene;

pub use classifier::classify;
pub use integrator::ParticleIntegrator;
pub use loader::CloudLoader;
pub use palette::{Palette, ShadeRole};
pub use scene::{ParticleScene, SceneConfig, ShapeKind};
