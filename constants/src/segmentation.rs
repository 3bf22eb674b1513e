// Shared configuration for histogram-based background detection.

/// Fixed working width images are downsampled to before analysis.
pub const WORKING_WIDTH: u32 = 600;

/// Histogram sampling stride in pixels, both axes.
pub const HISTOGRAM_STRIDE: u32 = 4;

/// Minimum alpha for a pixel to participate in segmentation stats.
pub const SEGMENTATION_ALPHA_MIN: u8 = 50;

/// Squared normalised centre distance beyond which a sample counts as outer zone.
pub const OUTER_ZONE_RADIUS_SQ: f32 = 0.3;

/// Outer/total ratio above which a colour bucket is classified as backdrop.
pub const BACKGROUND_OUTER_RATIO: f32 = 0.4;

/// Per-channel right shift for colour bucket quantisation (16 buckets per channel).
pub const QUANTIZE_SHIFT: u32 = 4;
