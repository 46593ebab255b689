//! Interpolation building blocks.
//!
//! - tridiagonal: Thomas algorithm used by the spline fitter
//! - spline: natural/clamped cubic spline in Hermite form
//! - parametric: arc-length reparametrization of 2D/3D polylines
//! - bezier: De Casteljau evaluation of arbitrary-degree curves

pub mod bezier;
pub mod functions;
pub mod parametric;
pub mod spline;
pub mod tridiagonal;

pub use bezier::{evaluate_axis, evaluate_curve, evaluate_curve_2d, evaluate_curve_3d};
pub use parametric::{fit_parametric, fit_parametric_2d, fit_parametric_3d, BoundaryTangents};
pub use spline::CubicSpline;
pub use tridiagonal::{solve_tridiagonal, TridiagonalSystem};
