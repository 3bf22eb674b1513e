// Shared thresholds for shade role classification.

/// Edge strength above which a particle takes the detail role.
pub const DETAIL_EDGE_THRESHOLD: f32 = 0.12;

/// Brightness below which a body pixel takes the shadow role.
pub const SHADOW_BRIGHTNESS_MAX: f32 = 0.25;

/// Brightness above which a body pixel takes the detail role.
pub const DETAIL_BRIGHTNESS_MIN: f32 = 0.85;
