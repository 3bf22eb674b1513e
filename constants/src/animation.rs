// Shared configuration for the per-frame particle integrator.

/// Base of the expansion-driven visual scale.
pub const VISUAL_SCALE_BASE: f32 = 0.5;

/// Span of the expansion-driven visual scale.
pub const VISUAL_SCALE_SPAN: f32 = 0.8;

/// Amplitude of the per-particle sinusoidal jitter at full expansion.
pub const NOISE_AMPLITUDE: f32 = 0.002;

/// First-order smoothing rate toward target positions, per second.
pub const LERP_RATE: f32 = 3.0;

/// Default whole-cloud rotation speed, radians per second.
pub const DEFAULT_ROTATION_SPEED: f32 = 0.05;

/// Default expansion control value.
pub const DEFAULT_EXPANSION: f32 = 0.5;
