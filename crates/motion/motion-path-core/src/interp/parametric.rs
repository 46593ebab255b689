//! Arc-length reparametrization of 2D/3D polylines.
//!
//! The cumulative Euclidean distance along the control polyline is used as the
//! spline parameter for every axis, and the fitted splines are resampled at
//! uniform parameter steps. Samples therefore land at roughly uniform spatial
//! spacing instead of uniform control-point index spacing.

use crate::data::{Vec2, Vec3};
use crate::error::{PathError, PathResult};
use crate::interp::functions::{split_axes_2d, split_axes_3d, zip_axes_2d, zip_axes_3d};
use crate::interp::spline::CubicSpline;

/// Optional tangent directions at the curve ends (one component per axis).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryTangents {
    pub start: Option<Vec<f32>>,
    pub end: Option<Vec<f32>>,
    /// Scale supplied tangents to unit length before use.
    pub normalize: bool,
}

impl BoundaryTangents {
    /// Natural boundaries at both ends.
    pub fn natural() -> Self {
        Self::default()
    }
}

/// Fit one spline per coordinate list against arc length and resample.
///
/// `coords` holds 2 or 3 parallel lists (x, y[, z]). Returns `sample_count`
/// values per axis.
pub fn fit_parametric(
    coords: &[&[f32]],
    sample_count: usize,
    tangents: &BoundaryTangents,
) -> PathResult<Vec<Vec<f32>>> {
    let dims = coords.len();
    if !(2..=3).contains(&dims) {
        return Err(PathError::DimensionMismatch {
            expected: 3,
            actual: dims,
        });
    }
    let n = coords[0].len();
    if let Some(axis) = coords.iter().find(|axis| axis.len() != n) {
        return Err(PathError::DimensionMismatch {
            expected: n,
            actual: axis.len(),
        });
    }
    if n == 0 {
        return Err(PathError::InsufficientControlPoints {
            required: 1,
            actual: 0,
        });
    }
    if sample_count < 2 {
        return Err(PathError::InsufficientSamples {
            requested: sample_count,
        });
    }
    for tangent in [&tangents.start, &tangents.end].into_iter().flatten() {
        if tangent.len() != dims {
            return Err(PathError::DimensionMismatch {
                expected: dims,
                actual: tangent.len(),
            });
        }
    }

    // Cumulative distance, keeping only knots that advance the parameter.
    let mut knots: Vec<usize> = vec![0];
    let mut dists: Vec<f32> = vec![0.0];
    let mut total = 0.0f32;
    for i in 1..n {
        let d2: f32 = coords.iter().map(|axis| (axis[i] - axis[i - 1]).powi(2)).sum();
        let dist = d2.sqrt();
        if dist > 0.0 {
            total += dist;
            knots.push(i);
            dists.push(total);
        }
    }

    if knots.len() < 2 {
        // Every point coincides; the curve is the point itself.
        return Ok(coords
            .iter()
            .map(|axis| vec![axis[0]; sample_count])
            .collect());
    }

    let dt = total / (sample_count - 1) as f32;
    let mut times: Vec<f32> = (0..sample_count).map(|i| i as f32 * dt).collect();
    times[sample_count - 1] = total;

    let start = boundary_slopes(tangents.start.as_deref(), tangents.normalize, dt)?;
    let end = boundary_slopes(tangents.end.as_deref(), tangents.normalize, dt)?;

    let mut out = Vec::with_capacity(dims);
    for (axis_idx, axis) in coords.iter().enumerate() {
        let ys: Vec<f32> = knots.iter().map(|&k| axis[k]).collect();
        let mut spline = CubicSpline::new();
        out.push(spline.fit_and_eval(
            &dists,
            &ys,
            &times,
            start.as_ref().map(|s| s[axis_idx]),
            end.as_ref().map(|s| s[axis_idx]),
        )?);
    }
    Ok(out)
}

/// Per-axis clamped slopes for one boundary, or `None` for a natural end.
fn boundary_slopes(tangent: Option<&[f32]>, normalize: bool, dt: f32) -> PathResult<Option<Vec<f32>>> {
    let Some(tangent) = tangent else {
        return Ok(None);
    };
    let mut dir = tangent.to_vec();
    if normalize {
        let magnitude = dir.iter().map(|c| c * c).sum::<f32>().sqrt();
        if !(magnitude > f32::EPSILON) {
            return Err(PathError::DegenerateTangent { magnitude });
        }
        for c in &mut dir {
            *c /= magnitude;
        }
    }
    Ok(Some(dir.into_iter().map(|c| c / dt).collect()))
}

/// Arc-length resampling of 2D points (rotations).
pub fn fit_parametric_2d(
    points: &[Vec2],
    sample_count: usize,
    tangents: &BoundaryTangents,
) -> PathResult<Vec<Vec2>> {
    let [x, y] = split_axes_2d(points);
    let axes = fit_parametric(&[x.as_slice(), y.as_slice()], sample_count, tangents)?;
    Ok(zip_axes_2d(&axes[0], &axes[1]))
}

/// Arc-length resampling of 3D points (positions).
pub fn fit_parametric_3d(
    points: &[Vec3],
    sample_count: usize,
    tangents: &BoundaryTangents,
) -> PathResult<Vec<Vec3>> {
    let [x, y, z] = split_axes_3d(points);
    let axes = fit_parametric(&[x.as_slice(), y.as_slice(), z.as_slice()], sample_count, tangents)?;
    Ok(zip_axes_3d(&axes[0], &axes[1], &axes[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn straight_line_is_evenly_spaced() {
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ];
        let out = fit_parametric_3d(&pts, 5, &BoundaryTangents::natural()).unwrap();
        assert_eq!(out.len(), 5);
        for (i, p) in out.iter().enumerate() {
            approx(p.x, i as f32, 1e-4);
            approx(p.y, 0.0, 1e-6);
        }
    }

    #[test]
    fn endpoints_match_first_and_last_points() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Vec2::new(6.0, 0.0)];
        let out = fit_parametric_2d(&pts, 11, &BoundaryTangents::natural()).unwrap();
        approx(out[0].x, 0.0, 1e-5);
        approx(out[0].y, 0.0, 1e-5);
        approx(out[10].x, 6.0, 1e-3);
        approx(out[10].y, 0.0, 1e-3);
        // Arc-length midpoint is the middle knot of a symmetric polyline.
        approx(out[5].x, 3.0, 1e-3);
        approx(out[5].y, 4.0, 1e-3);
    }

    #[test]
    fn single_sample_is_rejected() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        let err = fit_parametric_2d(&pts, 1, &BoundaryTangents::natural()).unwrap_err();
        assert_eq!(err, PathError::InsufficientSamples { requested: 1 });
    }

    #[test]
    fn coincident_points_collapse_to_constant() {
        let pts = [Vec3::new(2.0, 2.0, 2.0); 3];
        let out = fit_parametric_3d(&pts, 4, &BoundaryTangents::natural()).unwrap();
        assert_eq!(out, vec![Vec3::new(2.0, 2.0, 2.0); 4]);
    }

    #[test]
    fn duplicate_consecutive_points_are_skipped() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
        ];
        let out = fit_parametric_2d(&pts, 3, &BoundaryTangents::natural()).unwrap();
        approx(out[1].x, 1.0, 1e-4);
        assert!(out.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn zero_tangent_cannot_be_normalized() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let tangents = BoundaryTangents {
            start: Some(vec![0.0, 0.0]),
            end: None,
            normalize: true,
        };
        let err = fit_parametric_2d(&pts, 4, &tangents).unwrap_err();
        assert!(matches!(err, PathError::DegenerateTangent { .. }));
    }

    #[test]
    fn normalized_tangent_scales_by_step() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        let tangents = BoundaryTangents {
            start: Some(vec![5.0, 0.0]),
            end: Some(vec![5.0, 0.0]),
            normalize: true,
        };
        // dt = 2 / (3 - 1) = 1, so the unit tangent gives slope 1 in x: a straight line.
        let out = fit_parametric_2d(&pts, 3, &tangents).unwrap();
        approx(out[1].x, 1.0, 1e-5);
    }

    #[test]
    fn wrong_axis_count_is_rejected() {
        let x = [0.0f32, 1.0];
        let err = fit_parametric(&[&x[..]], 4, &BoundaryTangents::natural()).unwrap_err();
        assert!(matches!(err, PathError::DimensionMismatch { .. }));
    }
}
