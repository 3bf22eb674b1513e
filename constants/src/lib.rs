pub mod animation;
pub mod sampling;
pub mod segmentation;
pub mod shading;
