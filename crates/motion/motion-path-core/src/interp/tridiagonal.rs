//! Tridiagonal linear systems (Thomas algorithm).

use crate::error::{PathError, PathResult};

/// A tridiagonal matrix stored as three diagonals of equal length `n`.
///
/// `sub[0]` and `sup[n - 1]` lie outside the matrix and are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct TridiagonalSystem {
    pub sub: Vec<f32>,
    pub diag: Vec<f32>,
    pub sup: Vec<f32>,
}

impl TridiagonalSystem {
    /// Zero-filled `n x n` system.
    pub fn new(n: usize) -> Self {
        Self {
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    pub fn solve(&self, rhs: &[f32]) -> PathResult<Vec<f32>> {
        solve_tridiagonal(&self.sub, &self.diag, &self.sup, rhs)
    }
}

/// Solve `M x = rhs` by forward elimination and back substitution, O(n).
///
/// No pivoting: a zero pivot fails with `DegenerateSystem`.
pub fn solve_tridiagonal(
    sub: &[f32],
    diag: &[f32],
    sup: &[f32],
    rhs: &[f32],
) -> PathResult<Vec<f32>> {
    let n = diag.len();
    if n == 0 {
        return Err(PathError::DimensionMismatch {
            expected: 1,
            actual: 0,
        });
    }
    for len in [sub.len(), sup.len(), rhs.len()] {
        if len != n {
            return Err(PathError::DimensionMismatch {
                expected: n,
                actual: len,
            });
        }
    }

    if diag[0] == 0.0 {
        return Err(PathError::DegenerateSystem { row: 0 });
    }

    // Modified super-diagonal and right-hand side.
    let mut c = vec![0.0f32; n];
    let mut d = vec![0.0f32; n];
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];

    for i in 1..n {
        let pivot = diag[i] - sub[i] * c[i - 1];
        if pivot == 0.0 {
            return Err(PathError::DegenerateSystem { row: i });
        }
        c[i] = sup[i] / pivot;
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / pivot;
    }

    let mut x = d;
    for i in (0..n - 1).rev() {
        x[i] -= c[i] * x[i + 1];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-5, "left={a} right={b}");
    }

    #[test]
    fn solves_known_system() {
        // [2 1 0; 1 2 1; 0 1 2] x = [4, 8, 8]  =>  x = [1, 2, 3]
        let x = solve_tridiagonal(
            &[0.0, 1.0, 1.0],
            &[2.0, 2.0, 2.0],
            &[1.0, 1.0, 0.0],
            &[4.0, 8.0, 8.0],
        )
        .unwrap();
        approx(x[0], 1.0);
        approx(x[1], 2.0);
        approx(x[2], 3.0);
    }

    #[test]
    fn single_row_divides() {
        let x = solve_tridiagonal(&[0.0], &[4.0], &[0.0], &[2.0]).unwrap();
        assert_eq!(x, vec![0.5]);
    }

    #[test]
    fn zero_pivot_is_degenerate() {
        let err = solve_tridiagonal(&[0.0, 0.0], &[0.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, PathError::DegenerateSystem { row: 0 });

        // Second pivot cancels: 1 - 1 * (1 / 1) = 0
        let err = solve_tridiagonal(&[0.0, 1.0], &[1.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, PathError::DegenerateSystem { row: 1 });
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = solve_tridiagonal(&[0.0], &[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, PathError::DimensionMismatch { .. }));
    }

    #[test]
    fn system_builder_solves() {
        let mut m = TridiagonalSystem::new(2);
        m.diag = vec![3.0, 3.0];
        m.sup[0] = 1.0;
        m.sub[1] = 1.0;
        let x = m.solve(&[4.0, 4.0]).unwrap();
        approx(x[0], 1.0);
        approx(x[1], 1.0);
    }
}
