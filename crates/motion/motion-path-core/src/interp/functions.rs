//! Scalar and per-axis helpers shared by the interpolators.

use crate::data::{Vec2, Vec3};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

#[inline]
pub fn split_axes_2d(points: &[Vec2]) -> [Vec<f32>; 2] {
    [
        points.iter().map(|p| p.x).collect(),
        points.iter().map(|p| p.y).collect(),
    ]
}

#[inline]
pub fn split_axes_3d(points: &[Vec3]) -> [Vec<f32>; 3] {
    [
        points.iter().map(|p| p.x).collect(),
        points.iter().map(|p| p.y).collect(),
        points.iter().map(|p| p.z).collect(),
    ]
}

/// Recombine per-axis samples; the shortest axis bounds the output.
pub fn zip_axes_2d(x: &[f32], y: &[f32]) -> Vec<Vec2> {
    x.iter().zip(y).map(|(&x, &y)| Vec2::new(x, y)).collect()
}

pub fn zip_axes_3d(x: &[f32], y: &[f32], z: &[f32]) -> Vec<Vec3> {
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((&x, &y), &z)| Vec3::new(x, y, z))
        .collect()
}
