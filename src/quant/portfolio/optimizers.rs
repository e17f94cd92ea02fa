//! # Markowitz Optimizer
//!
//! $$
//! \min_{\mathbf w}\ \mathbf w^\top S\,\mathbf w
//! \quad\text{s.t.}\quad \mathbf w^\top\mu=\mu^\*,\ \ \mathbf w^\top\mathbf 1=1
//! $$
//!
//! The first-order conditions of the equality-constrained quadratic program
//! form a single linear system in the weights and the two Lagrange
//! multipliers:
//!
//! $$
//! \begin{bmatrix}2S & \mu & \mathbf 1\\ \mu^\top & 0 & 0\\ \mathbf 1^\top & 0 & 0\end{bmatrix}
//! \begin{bmatrix}\mathbf w\\ \lambda_1\\ \lambda_2\end{bmatrix}
//! =\begin{bmatrix}\mathbf 0\\ \mu^\*\\ 1\end{bmatrix}
//! $$
//!
//! There is no sign constraint on the weights, so short positions appear as
//! negative entries.

use approx::relative_eq;
use ndarray::s;
use ndarray::Array1;
use ndarray::Array2;

use super::backend::LinalgBackend;
use super::covariance::estimate_moments;
use super::covariance::ReturnMoments;
use super::data::ReturnsMatrix;
use super::error::PortfolioError;
use super::rates::annual_target;
use super::rates::annualize_volatility;
use super::rates::daily_target;
use super::rates::RateConversion;
use super::types::OptimizationResult;

/// Weights and multipliers of a solved KKT system.
#[derive(Clone, Debug, PartialEq)]
pub struct KktSolution {
  /// Portfolio weights.
  pub weights: Array1<f64>,
  /// Multipliers of the return constraint and of the budget constraint.
  pub multipliers: [f64; 2],
}

/// Assemble the `(N+2) x (N+2)` KKT matrix and right-hand side.
pub fn build_kkt_system(
  mu: &Array1<f64>,
  cov: &Array2<f64>,
  mu_opt: f64,
) -> (Array2<f64>, Array1<f64>) {
  let n = mu.len();
  let mut a = Array2::<f64>::zeros((n + 2, n + 2));
  a.slice_mut(s![..n, ..n]).assign(&(cov * 2.0));

  for i in 0..n {
    a[[i, n]] = mu[i];
    a[[n, i]] = mu[i];
    a[[i, n + 1]] = 1.0;
    a[[n + 1, i]] = 1.0;
  }

  let mut b = Array1::<f64>::zeros(n + 2);
  b[n] = mu_opt;
  b[n + 1] = 1.0;

  (a, b)
}

/// Solve the KKT system for a daily target `mu_opt`. `None` if it is singular.
pub fn solve_kkt<B: LinalgBackend>(
  backend: &B,
  mu: &Array1<f64>,
  cov: &Array2<f64>,
  mu_opt: f64,
) -> Option<KktSolution> {
  let n = mu.len();
  let (a, b) = build_kkt_system(mu, cov, mu_opt);
  let z = backend.solve(&a, &b)?;

  Some(KktSolution {
    weights: z.slice(s![..n]).to_owned(),
    multipliers: [z[n], z[n + 1]],
  })
}

/// Daily portfolio variance `w S w'`, clamped at zero.
pub fn portfolio_variance(weights: &Array1<f64>, cov: &Array2<f64>) -> f64 {
  weights.dot(&cov.dot(weights)).max(0.0)
}

/// Minimum-variance weights for an annualized target return (percent).
pub fn optimize_markowitz<B: LinalgBackend>(
  backend: &B,
  matrix: &ReturnsMatrix,
  target_return: f64,
) -> Result<OptimizationResult, PortfolioError> {
  if !target_return.is_finite() {
    return Err(PortfolioError::NonFiniteTarget {
      target: target_return,
    });
  }

  let moments = estimate_moments(backend, matrix)?;
  let mu_opt = daily_target(target_return);

  let (weights, daily_volatility) = match matrix.n_assets() {
    0 => return Err(PortfolioError::EmptyPortfolio),
    1 => single_asset(matrix, &moments, target_return, mu_opt)?,
    n => {
      let singular = || PortfolioError::SingularSystem {
        dimension: n + 2,
        symbols: matrix.symbols().to_vec(),
      };
      // a redundant asset can leave the KKT matrix invertible when its mean differs
      if !backend.is_full_rank(&moments.covariance) {
        return Err(singular());
      }

      tracing::debug!(dimension = n + 2, mu_opt, "solving KKT system");
      let solution =
        solve_kkt(backend, &moments.mean, &moments.covariance, mu_opt).ok_or_else(singular)?;
      let variance = portfolio_variance(&solution.weights, &moments.covariance);
      (solution.weights, variance.sqrt())
    }
  };

  Ok(OptimizationResult {
    symbols: matrix.symbols().to_vec(),
    weights,
    asset_returns: moments.mean.to_annualized_rate(),
    asset_volatilities: moments.volatilities().mapv(annualize_volatility),
    portfolio_return: target_return,
    portfolio_volatility: annualize_volatility(daily_volatility),
    daily_volatility,
    target_return,
    version: 0,
  })
}

// A lone asset makes the KKT matrix singular; its only attainable return is
// its own mean.
fn single_asset(
  matrix: &ReturnsMatrix,
  moments: &ReturnMoments,
  target_return: f64,
  mu_opt: f64,
) -> Result<(Array1<f64>, f64), PortfolioError> {
  let mean = moments.mean[0];
  if !relative_eq!(mean, mu_opt, epsilon = 1e-12, max_relative = 1e-9) {
    return Err(PortfolioError::UnattainableReturn {
      symbol: matrix.symbols()[0].clone(),
      target: target_return,
      attainable: annual_target(mean),
    });
  }

  let sigma = moments.volatilities()[0];
  Ok((Array1::from_elem(1, 1.0), sigma))
}
