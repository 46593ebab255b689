//! Natural / clamped cubic spline interpolation.
//!
//! Each segment [x_i, x_{i+1}] is stored in Hermite form through two
//! coefficients (a_i, b_i) derived from the knot slopes k:
//!
//!   q(t) = (1 - t) y_i + t y_{i+1} + t (1 - t) (a_i (1 - t) + b_i t)
//!
//! with t = (x - x_i) / (x_{i+1} - x_i). The slopes come from a tridiagonal
//! system whose interior rows enforce C1/C2 continuity; the end rows are either
//! natural (zero second derivative) or clamped to a caller-supplied slope.
//!
//! Evaluation walks the segments with a forward-only cursor, so queries must be
//! non-decreasing for as long as the cursor is not rewound.

use crate::error::{PathError, PathResult};
use crate::interp::tridiagonal::TridiagonalSystem;

/// Fitted spline state; `a`/`b` are empty until `fit` succeeds.
#[derive(Clone, Debug, Default)]
pub struct CubicSpline {
    xs: Vec<f32>,
    ys: Vec<f32>,
    a: Vec<f32>,
    b: Vec<f32>,
    cursor: usize,
    last_query: Option<f32>,
}

impl CubicSpline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit through `(xs, ys)`. `None` for a slope selects the natural boundary.
    pub fn fit(
        &mut self,
        xs: &[f32],
        ys: &[f32],
        start_slope: Option<f32>,
        end_slope: Option<f32>,
    ) -> PathResult<()> {
        // Discard any previous fit so every failure below leaves the spline unfitted.
        self.a.clear();
        self.b.clear();

        for slope in [start_slope, end_slope].into_iter().flatten() {
            if !slope.is_finite() {
                return Err(PathError::InvalidBoundary { slope });
            }
        }
        let n = xs.len();
        if ys.len() != n {
            return Err(PathError::DimensionMismatch {
                expected: n,
                actual: ys.len(),
            });
        }
        if n < 2 {
            return Err(PathError::InsufficientControlPoints {
                required: 2,
                actual: n,
            });
        }
        if let Some(i) = (1..n).find(|&i| !(xs[i] > xs[i - 1])) {
            return Err(PathError::NonIncreasingKnots { index: i });
        }

        let mut m = TridiagonalSystem::new(n);
        let mut r = vec![0.0f32; n];

        match start_slope {
            None => {
                let dx = xs[1] - xs[0];
                m.sup[0] = 1.0 / dx;
                m.diag[0] = 2.0 * m.sup[0];
                r[0] = 3.0 * (ys[1] - ys[0]) / (dx * dx);
            }
            Some(slope) => {
                m.diag[0] = 1.0;
                r[0] = slope;
            }
        }

        for i in 1..n - 1 {
            let dx1 = xs[i] - xs[i - 1];
            let dx2 = xs[i + 1] - xs[i];
            m.sub[i] = 1.0 / dx1;
            m.sup[i] = 1.0 / dx2;
            m.diag[i] = 2.0 * (m.sub[i] + m.sup[i]);

            let dy1 = ys[i] - ys[i - 1];
            let dy2 = ys[i + 1] - ys[i];
            r[i] = 3.0 * (dy1 / (dx1 * dx1) + dy2 / (dx2 * dx2));
        }

        match end_slope {
            None => {
                let dx = xs[n - 1] - xs[n - 2];
                let dy = ys[n - 1] - ys[n - 2];
                m.sub[n - 1] = 1.0 / dx;
                m.diag[n - 1] = 2.0 * m.sub[n - 1];
                r[n - 1] = 3.0 * dy / (dx * dx);
            }
            Some(slope) => {
                m.diag[n - 1] = 1.0;
                r[n - 1] = slope;
            }
        }

        let k = m.solve(&r)?;

        let mut a = Vec::with_capacity(n - 1);
        let mut b = Vec::with_capacity(n - 1);
        for i in 1..n {
            let dx = xs[i] - xs[i - 1];
            let dy = ys[i] - ys[i - 1];
            a.push(k[i - 1] * dx - dy);
            b.push(-k[i] * dx + dy);
        }

        self.xs = xs.to_vec();
        self.ys = ys.to_vec();
        self.a = a;
        self.b = b;
        self.rewind();
        Ok(())
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        !self.a.is_empty()
    }

    /// Number of fitted segments (knots - 1), zero before a fit.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.a.len()
    }

    /// Reset the evaluation cursor so queries may start over from the first knot.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.last_query = None;
    }

    /// Evaluate at each query; queries continue the cursor of earlier calls.
    pub fn eval(&mut self, queries: &[f32]) -> PathResult<Vec<f32>> {
        self.ensure_fitted()?;
        let mut out = Vec::with_capacity(queries.len());
        for &x in queries {
            let j = self.advance(x)?;
            let (t, _) = self.local(x, j);
            let (y0, y1) = (self.ys[j], self.ys[j + 1]);
            let (a, b) = (self.a[j], self.b[j]);
            out.push((1.0 - t) * y0 + t * y1 + t * (1.0 - t) * (a * (1.0 - t) + b * t));
        }
        Ok(out)
    }

    /// First derivative dy/dx at each query, sharing the cursor with `eval`.
    pub fn eval_slope(&mut self, queries: &[f32]) -> PathResult<Vec<f32>> {
        self.ensure_fitted()?;
        let mut out = Vec::with_capacity(queries.len());
        for &x in queries {
            let j = self.advance(x)?;
            let (t, dx) = self.local(x, j);
            let dy = self.ys[j + 1] - self.ys[j];
            let (a, b) = (self.a[j], self.b[j]);
            out.push(
                dy / dx
                    + (1.0 - 2.0 * t) * (a * (1.0 - t) + b * t) / dx
                    + t * (1.0 - t) * (b - a) / dx,
            );
        }
        Ok(out)
    }

    /// Fit, then evaluate from a fresh cursor.
    pub fn fit_and_eval(
        &mut self,
        xs: &[f32],
        ys: &[f32],
        queries: &[f32],
        start_slope: Option<f32>,
        end_slope: Option<f32>,
    ) -> PathResult<Vec<f32>> {
        self.fit(xs, ys, start_slope, end_slope)?;
        self.eval(queries)
    }

    fn ensure_fitted(&self) -> PathResult<()> {
        if self.is_fitted() {
            Ok(())
        } else {
            Err(PathError::NotFitted)
        }
    }

    /// Move the cursor forward to the segment containing `x`.
    fn advance(&mut self, x: f32) -> PathResult<usize> {
        if let Some(previous) = self.last_query {
            if x < previous {
                return Err(PathError::UnsortedQuery { value: x, previous });
            }
        }
        self.last_query = Some(x);
        let last_segment = self.xs.len() - 2;
        while self.cursor < last_segment && x > self.xs[self.cursor + 1] {
            self.cursor += 1;
        }
        Ok(self.cursor)
    }

    #[inline]
    fn local(&self, x: f32, j: usize) -> (f32, f32) {
        let dx = self.xs[j + 1] - self.xs[j];
        ((x - self.xs[j]) / dx, dx)
    }
}

/// One-shot interpolation of `queries` through `(xs, ys)`.
pub fn interpolate(
    xs: &[f32],
    ys: &[f32],
    queries: &[f32],
    start_slope: Option<f32>,
    end_slope: Option<f32>,
) -> PathResult<Vec<f32>> {
    CubicSpline::new().fit_and_eval(xs, ys, queries, start_slope, end_slope)
}
