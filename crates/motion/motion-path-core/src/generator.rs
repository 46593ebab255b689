//! Dense track generation from sparse control points.
//!
//! Model:
//! - Linear: (n - 1) * interval samples, straight blends at j / interval.
//! - Bezier: one curve through all points, n * interval samples at t = i / m.
//! - CubicSpline: arc-length parametric spline, n * interval uniform samples.
//! - In every mode the final sample is pinned to the final control point.
//!
//! Positions and rotations are generated independently with the same mode.

use serde::{Deserialize, Serialize};

use crate::data::{EasingMode, Vec2, Vec3};
use crate::error::{PathError, PathResult};
use crate::interp::bezier::{evaluate_curve_2d, evaluate_curve_3d};
use crate::interp::parametric::{fit_parametric_2d, fit_parametric_3d, BoundaryTangents};

/// Dense output of one generation pass. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTrack {
    pub positions: Vec<Vec3>,
    pub rotations: Vec<Vec2>,
}

impl GeneratedTrack {
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, frame: usize) -> Option<Vec3> {
        self.positions.get(frame).copied()
    }

    #[inline]
    pub fn rotation(&self, frame: usize) -> Option<Vec2> {
        self.rotations.get(frame).copied()
    }
}

/// Build both dense tracks for `mode`. `interval` must already be clamped to >= 1.
pub fn generate_track(
    mode: EasingMode,
    interval: usize,
    positions: &[Vec3],
    rotations: &[Vec2],
) -> PathResult<GeneratedTrack> {
    let interval = interval.max(1);
    let (mut dense_pos, mut dense_rot) = match mode {
        EasingMode::Linear => (
            linear_track(positions, interval, Vec3::lerp),
            linear_track(rotations, interval, Vec2::lerp),
        ),
        EasingMode::Bezier => {
            require_pair(mode, "positions", positions.len())?;
            let pos = evaluate_curve_3d(positions, interval)?;
            let rot = if rotations.is_empty() {
                Vec::new()
            } else {
                require_pair(mode, "rotations", rotations.len())?;
                evaluate_curve_2d(rotations, interval)?
            };
            (pos, rot)
        }
        EasingMode::CubicSpline => {
            require_pair(mode, "positions", positions.len())?;
            let natural = BoundaryTangents::natural();
            let pos = fit_parametric_3d(positions, positions.len() * interval, &natural)?;
            let rot = if rotations.is_empty() {
                Vec::new()
            } else {
                require_pair(mode, "rotations", rotations.len())?;
                fit_parametric_2d(rotations, rotations.len() * interval, &natural)?
            };
            (pos, rot)
        }
    };

    pin_last(&mut dense_pos, positions);
    pin_last(&mut dense_rot, rotations);

    Ok(GeneratedTrack {
        positions: dense_pos,
        rotations: dense_rot,
    })
}

/// Piecewise-linear densification; fewer than two points yield an empty track.
fn linear_track<T: Copy>(points: &[T], interval: usize, lerp: fn(T, T, f32) -> T) -> Vec<T> {
    let mut out = Vec::with_capacity(points.len().saturating_sub(1) * interval);
    for pair in points.windows(2) {
        for j in 0..interval {
            out.push(lerp(pair[0], pair[1], j as f32 / interval as f32));
        }
    }
    out
}

fn require_pair(mode: EasingMode, sequence: &str, actual: usize) -> PathResult<()> {
    if actual < 2 {
        return Err(PathError::EmptyControlSet {
            easing: mode.name().to_string(),
            sequence: sequence.to_string(),
            actual,
        });
    }
    Ok(())
}

/// Overwrite the final dense sample with the exact final control point.
fn pin_last<T: Copy>(dense: &mut [T], control: &[T]) {
    if let (Some(slot), Some(last)) = (dense.last_mut(), control.last()) {
        *slot = *last;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_two_points_interval_four() {
        let pos = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)];
        let track = generate_track(EasingMode::Linear, 4, &pos, &[]).unwrap();
        assert_eq!(
            track.positions,
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.5, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
            ]
        );
        assert!(track.rotations.is_empty());
    }

    #[test]
    fn linear_tolerates_zero_and_one_point() {
        let empty = generate_track(EasingMode::Linear, 5, &[], &[]).unwrap();
        assert!(empty.is_empty());
        let single = generate_track(EasingMode::Linear, 5, &[Vec3::new(1.0, 1.0, 1.0)], &[]).unwrap();
        assert!(single.is_empty());
    }

    #[test]
    fn bezier_and_spline_need_two_positions() {
        for mode in [EasingMode::Bezier, EasingMode::CubicSpline] {
            let err = generate_track(mode, 3, &[Vec3::new(0.0, 0.0, 0.0)], &[]).unwrap_err();
            assert!(matches!(err, PathError::EmptyControlSet { actual: 1, .. }));
        }
    }

    #[test]
    fn single_rotation_is_rejected_for_curves() {
        let pos = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let err = generate_track(EasingMode::Bezier, 3, &pos, &[Vec2::new(0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, PathError::EmptyControlSet { .. }));
    }

    #[test]
    fn track_lengths_per_mode() {
        let pos = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 2.0, 0.0),
            Vec3::new(8.0, 0.0, 1.0),
        ];
        let rot = [Vec2::new(0.0, 0.0), Vec2::new(90.0, 10.0)];

        let linear = generate_track(EasingMode::Linear, 10, &pos, &rot).unwrap();
        assert_eq!(linear.positions.len(), 20);
        assert_eq!(linear.rotations.len(), 10);

        let bezier = generate_track(EasingMode::Bezier, 10, &pos, &rot).unwrap();
        assert_eq!(bezier.positions.len(), 30);
        assert_eq!(bezier.rotations.len(), 20);

        let spline = generate_track(EasingMode::CubicSpline, 10, &pos, &rot).unwrap();
        assert_eq!(spline.positions.len(), 30);
        assert_eq!(spline.rotations.len(), 20);

        for track in [&linear, &bezier, &spline] {
            assert_eq!(track.positions.first(), Some(&pos[0]));
            assert_eq!(track.positions.last(), Some(&pos[2]));
            assert_eq!(track.rotations.last(), Some(&rot[1]));
        }
    }
}
