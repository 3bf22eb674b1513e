// Shared configuration for candidate pixel sampling and coordinate mapping.

/// Default particle count for a scene.
pub const DEFAULT_POINT_COUNT: usize = 35_000;

/// Default conversion scale in scene units.
pub const DEFAULT_SCALE: f32 = 2.5;

/// Alpha at or below which a pixel never becomes a candidate particle.
pub const CANDIDATE_ALPHA_MIN: u8 = 20;

/// Gradient magnitude mapped to edge strength 1.0.
pub const EDGE_MAGNITUDE_FULL: f32 = 100.0;

/// Edge strength above which importance gains the edge weighting.
pub const EDGE_IMPORTANCE_GATE: f32 = 0.2;

/// Importance weight applied to gated edge strength.
pub const EDGE_IMPORTANCE_WEIGHT: f32 = 1000.0;

/// Flat importance bonus for foreground pixels.
pub const FOREGROUND_IMPORTANCE_BONUS: f32 = 500.0;

/// Span of the uniform random importance component.
pub const RANDOM_IMPORTANCE_SPAN: f32 = 100.0;

/// Edge strength at or above which a backdrop-coloured pixel stays foreground.
pub const BACKGROUND_EDGE_MAX: f32 = 0.5;

/// Horizontal scanline count the y axis is quantised to.
pub const SCANLINE_COUNT: f32 = 240.0;

/// Half-width of the positional jitter applied to padded duplicates (pixels).
pub const PADDING_JITTER: f32 = 0.5;

/// Foreground depth span per unit brightness, in scale units.
pub const DEPTH_BRIGHTNESS_SPAN: f32 = 0.15;

/// Foreground depth lift, in scale units.
pub const DEPTH_FOREGROUND_LIFT: f32 = 0.1;

/// Depth bump per unit edge strength, in scale units.
pub const DEPTH_EDGE_BUMP: f32 = 0.05;

/// Backdrop depth base offset, in scale units.
pub const DEPTH_BACKGROUND_BASE: f32 = -0.5;

/// Brightness-proportional term added to backdrop depth.
pub const DEPTH_BACKGROUND_BRIGHTNESS: f32 = 0.1;
