//! Bezier curves of arbitrary degree via De Casteljau reduction.
//!
//! All control points of a path define a single curve (degree = count - 1);
//! each axis is evaluated independently and recombined.

use crate::data::{Vec2, Vec3};
use crate::error::{PathError, PathResult};
use crate::interp::functions::{lerp_f32, split_axes_2d, split_axes_3d, zip_axes_2d, zip_axes_3d};

/// Evaluate one axis of the curve at `t`.
///
/// Repeatedly blends adjacent pairs until a single value remains; exact at
/// t = 0 and t = 1.
pub fn evaluate_axis(values: &[f32], t: f32) -> PathResult<f32> {
    if values.len() < 2 {
        return Err(PathError::InsufficientControlPoints {
            required: 2,
            actual: values.len(),
        });
    }
    let mut scratch = values.to_vec();
    let mut len = scratch.len();
    while len > 1 {
        for i in 0..len - 1 {
            scratch[i] = lerp_f32(scratch[i], scratch[i + 1], t);
        }
        len -= 1;
    }
    Ok(scratch[0])
}

/// Sample one axis at `t = i / m` for i in [0, m), m = len * samples_per_point.
///
/// t = 1 is never reached; callers pin the final sample themselves.
pub fn evaluate_curve(values: &[f32], samples_per_point: usize) -> PathResult<Vec<f32>> {
    if values.len() < 2 {
        return Err(PathError::InsufficientControlPoints {
            required: 2,
            actual: values.len(),
        });
    }
    let m = values.len() * samples_per_point;
    (0..m)
        .map(|i| evaluate_axis(values, i as f32 / m as f32))
        .collect()
}

pub fn evaluate_curve_2d(points: &[Vec2], samples_per_point: usize) -> PathResult<Vec<Vec2>> {
    let [x, y] = split_axes_2d(points);
    let x = evaluate_curve(&x, samples_per_point)?;
    let y = evaluate_curve(&y, samples_per_point)?;
    Ok(zip_axes_2d(&x, &y))
}

pub fn evaluate_curve_3d(points: &[Vec3], samples_per_point: usize) -> PathResult<Vec<Vec3>> {
    let [x, y, z] = split_axes_3d(points);
    let x = evaluate_curve(&x, samples_per_point)?;
    let y = evaluate_curve(&y, samples_per_point)?;
    let z = evaluate_curve(&z, samples_per_point)?;
    Ok(zip_axes_3d(&x, &y, &z))
}
