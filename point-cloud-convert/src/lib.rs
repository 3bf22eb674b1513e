//! Image to point cloud conversion pipeline.
//!
//! Turns a raster image into a fixed-size particle target set with
//! per-particle brightness, edge strength, and backdrop attributes.
//! Conversion never fails: decode errors and fully transparent images
//! degrade to the Fibonacci sphere fallback of the same length.

pub mod cloud;
pub mod colour;
pub mod convert;
pub mod sampler;
pub mod segmentation;
pub mod sphere;

pub use cloud::{CloudSource, PointCloud};
pub use colour::Rgb;
pub use convert::convert_image;
pub use sphere::generate_sphere;
