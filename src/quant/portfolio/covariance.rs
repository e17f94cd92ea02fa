//! # Return Moments
//!
//! $$
//! \hat\mu_j=\frac1M\sum_t X_{tj},\qquad
//! \hat S_{ij}=\frac1{M-1}\sum_t (X_{ti}-\hat\mu_i)(X_{tj}-\hat\mu_j)
//! $$
//!
//! Sample mean and sample covariance of a returns matrix. Volatilities are
//! later read as `sqrt(diag(S))`, so the `M - 1` divisor carries through.

use ndarray::Array1;
use ndarray::Array2;

use super::backend::LinalgBackend;
use super::data::ReturnsMatrix;
use super::data::MIN_SAMPLES;
use super::error::PortfolioError;

/// Mean daily returns and their covariance, in returns-matrix column order.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnMoments {
  pub mean: Array1<f64>,
  pub covariance: Array2<f64>,
}

impl ReturnMoments {
  /// Daily volatility per asset, `sqrt(diag(S))`.
  pub fn volatilities(&self) -> Array1<f64> {
    self.covariance.diag().mapv(|v| v.max(0.0).sqrt())
  }
}

/// Estimate mean and covariance of the columns of `matrix`.
pub fn estimate_moments<B: LinalgBackend>(
  backend: &B,
  matrix: &ReturnsMatrix,
) -> Result<ReturnMoments, PortfolioError> {
  let too_short = || PortfolioError::InsufficientSamples {
    symbol: matrix.symbols().join(","),
    required: MIN_SAMPLES,
    actual: matrix.n_samples(),
  };

  let mean = backend
    .column_means(matrix.values())
    .ok_or_else(too_short)?;
  let covariance = backend
    .covariance(matrix.values())
    .ok_or_else(too_short)?;

  Ok(ReturnMoments { mean, covariance })
}
