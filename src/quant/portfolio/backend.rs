//! # Linear Algebra Backend
//!
//! $$
//! A\mathbf{z}=\mathbf{b},\qquad \operatorname{rank}(A)=n
//! $$
//!
//! Numeric operations the estimator and the solver need, kept behind a
//! trait so the KKT construction does not depend on the concrete library.

use nalgebra::DMatrix;
use nalgebra::DVector;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use ndarray_stats::CorrelationExt;

/// Column statistics and dense linear solves over `f64` arrays.
pub trait LinalgBackend {
  /// Column-wise sample mean of an `M x N` matrix. `None` when `M == 0`.
  fn column_means(&self, x: &Array2<f64>) -> Option<Array1<f64>>;

  /// `N x N` sample covariance (divisor `M - 1`) of the columns of `x`.
  /// `None` when `M < 2`.
  fn covariance(&self, x: &Array2<f64>) -> Option<Array2<f64>>;

  /// Solve the square system `a z = b`. `None` when `a` is numerically
  /// singular or the solution is not finite.
  fn solve(&self, a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>>;

  /// Whether the square matrix `a` has full numerical rank.
  fn is_full_rank(&self, a: &Array2<f64>) -> bool;
}

/// Default backend: ndarray/ndarray-stats for statistics, nalgebra for the
/// rank test and LU solve.
#[derive(Clone, Copy, Debug, Default)]
pub struct NalgebraBackend;

impl LinalgBackend for NalgebraBackend {
  fn column_means(&self, x: &Array2<f64>) -> Option<Array1<f64>> {
    x.mean_axis(Axis(0))
  }

  fn covariance(&self, x: &Array2<f64>) -> Option<Array2<f64>> {
    if x.nrows() < 2 || x.ncols() == 0 {
      return None;
    }

    // ndarray-stats expects variables in rows
    x.t().cov(1.0).ok()
  }

  fn solve(&self, a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n == 0 || a.ncols() != n || b.len() != n {
      return None;
    }

    if !self.is_full_rank(a) {
      return None;
    }

    let mat = to_dmatrix(a);
    let rhs = DVector::from_iterator(n, b.iter().copied());
    let z = mat.lu().solve(&rhs)?;
    if z.iter().any(|v| !v.is_finite()) {
      return None;
    }

    Some(Array1::from_iter(z.iter().copied()))
  }

  // singular values below `max_sv * n * eps` count as zero
  fn is_full_rank(&self, a: &Array2<f64>) -> bool {
    let n = a.nrows();
    if n == 0 || a.ncols() != n {
      return false;
    }

    let svd = to_dmatrix(a).svd(false, false);
    let max_sv = svd.singular_values.max();
    let tol = max_sv * n as f64 * f64::EPSILON;
    max_sv > 0.0 && svd.rank(tol) == n
  }
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
  DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  #[test]
  fn covariance_uses_sample_divisor() {
    let x = array![[1.0, 2.0], [3.0, 6.0], [5.0, 4.0]];
    let cov = NalgebraBackend.covariance(&x).unwrap();

    // var(col0) = ((-2)^2 + 0 + 2^2) / 2
    assert!((cov[[0, 0]] - 4.0).abs() < 1e-12);
    assert!((cov[[1, 1]] - 4.0).abs() < 1e-12);
    assert!((cov[[0, 1]] - 2.0).abs() < 1e-12);
    assert_eq!(cov[[0, 1]], cov[[1, 0]]);
  }

  #[test]
  fn covariance_needs_two_rows() {
    let x = array![[1.0, 2.0]];
    assert!(NalgebraBackend.covariance(&x).is_none());
  }

  #[test]
  fn column_means_are_per_asset() {
    let x = array![[1.0, 10.0], [3.0, 20.0]];
    let mu = NalgebraBackend.column_means(&x).unwrap();
    assert_eq!(mu, array![2.0, 15.0]);
  }

  #[test]
  fn solve_dense_system() {
    let a = array![[4.0, 1.0], [2.0, 3.0]];
    let b = array![1.0, 2.0];
    let z = NalgebraBackend.solve(&a, &b).unwrap();

    assert!((z[0] - 0.1).abs() < 1e-12);
    assert!((z[1] - 0.6).abs() < 1e-12);
  }

  #[test]
  fn solve_rejects_singular_matrix() {
    let a = array![[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]];
    let b = array![1.0, 2.0, 3.0];
    assert!(NalgebraBackend.solve(&a, &b).is_none());
  }

  #[test]
  fn rank_test_flags_collinear_columns() {
    let shifted = array![[0.0004, 0.0004], [0.0004, 0.0004]];
    assert!(!NalgebraBackend.is_full_rank(&shifted));
    assert!(NalgebraBackend.is_full_rank(&array![[0.0004, 0.0001], [0.0001, 0.0009]]));
    assert!(!NalgebraBackend.is_full_rank(&array![[1.0, 2.0]]));
  }

  #[test]
  fn solve_rejects_non_square_input() {
    let a = Array2::<f64>::zeros((2, 3));
    let b = array![1.0, 2.0];
    assert!(NalgebraBackend.solve(&a, &b).is_none());
  }
}
