//! Deterministic fallback particle distribution.

use std::f32::consts::PI;

/// Generate `count` positions on a Fibonacci sphere of the given radius.
/// Returns a flat xyz buffer of length `count * 3`.
pub fn generate_sphere(count: usize, radius: f32) -> Vec<f32> {
    let mut positions = vec![0.0f32; count * 3];
    for i in 0..count {
        let phi = (-1.0 + 2.0 * i as f32 / count as f32).acos();
        let theta = (count as f32 * PI).sqrt() * phi;
        positions[i * 3] = radius * theta.cos() * phi.sin();
        positions[i * 3 + 1] = radius * theta.sin() * phi.sin();
        positions[i * 3 + 2] = radius * phi.cos();
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_length_matches_count() {
        assert_eq!(generate_sphere(0, 1.0).len(), 0);
        assert_eq!(generate_sphere(1, 1.0).len(), 3);
        assert_eq!(generate_sphere(1000, 2.5).len(), 3000);
    }

    #[test]
    fn points_lie_on_the_sphere() {
        let radius = 2.5;
        let positions = generate_sphere(500, radius);
        for p in positions.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - radius).abs() < 1e-3, "point off sphere: r = {r}");
        }
    }

    #[test]
    fn distribution_is_deterministic() {
        assert_eq!(generate_sphere(100, 1.0), generate_sphere(100, 1.0));
    }
}
