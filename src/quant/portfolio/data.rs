//! # Portfolio Data
//!
//! $$
//! X\in\mathbb R^{M\times N},\qquad X_{tj}=r_{j,t},\ t<M
//! $$
//!
//! Per-asset return series and their assembly into a fixed-width returns
//! matrix whose columns follow the explicit asset order.

use impl_new_derive::ImplNew;
use ndarray::Array2;
use serde::Deserialize;
use serde::Serialize;

use super::error::PortfolioError;

/// Default sample window, in trading days.
pub const WINDOW_LENGTH: usize = 250;

/// Fewest rows a sample covariance can be computed from.
pub const MIN_SAMPLES: usize = 2;

/// Daily returns of one asset, in the order the data source produced them.
#[derive(ImplNew, Clone, Debug, PartialEq)]
pub struct AssetReturnSeries {
  /// Ticker symbol, unique within a portfolio.
  pub symbol: String,
  /// Fractional daily returns.
  pub returns: Vec<f64>,
}

impl AssetReturnSeries {
  pub fn len(&self) -> usize {
    self.returns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.returns.is_empty()
  }
}

/// What to do with a series shorter than the sample window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortSeriesPolicy {
  /// Fail with [`PortfolioError::InsufficientSamples`].
  #[default]
  Reject,
  /// Shrink the window to the shortest series so every column stays full.
  Truncate,
}

/// `M x N` matrix of daily returns with its column symbols.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnsMatrix {
  symbols: Vec<String>,
  values: Array2<f64>,
}

impl ReturnsMatrix {
  /// Column symbols, in column order.
  pub fn symbols(&self) -> &[String] {
    &self.symbols
  }

  pub fn values(&self) -> &Array2<f64> {
    &self.values
  }

  /// Number of rows (samples per asset).
  pub fn n_samples(&self) -> usize {
    self.values.nrows()
  }

  /// Number of columns (assets).
  pub fn n_assets(&self) -> usize {
    self.values.ncols()
  }
}

/// Assembles a [`ReturnsMatrix`] from an ordered list of asset series.
#[derive(Clone, Copy, Debug)]
pub struct ReturnsMatrixBuilder {
  window: usize,
  policy: ShortSeriesPolicy,
}

impl Default for ReturnsMatrixBuilder {
  fn default() -> Self {
    Self::new(WINDOW_LENGTH, ShortSeriesPolicy::default())
  }
}

impl ReturnsMatrixBuilder {
  pub fn new(window: usize, policy: ShortSeriesPolicy) -> Self {
    Self { window, policy }
  }

  pub fn window(&self) -> usize {
    self.window
  }

  pub fn policy(&self) -> ShortSeriesPolicy {
    self.policy
  }

  /// Build the matrix. Column `j` holds the first rows of `assets[j]`.
  pub fn build(&self, assets: &[AssetReturnSeries]) -> Result<ReturnsMatrix, PortfolioError> {
    if assets.is_empty() {
      return Err(PortfolioError::EmptyPortfolio);
    }

    let rows = match self.policy {
      ShortSeriesPolicy::Reject => {
        if let Some(short) = assets.iter().find(|a| a.len() < self.window) {
          return Err(PortfolioError::InsufficientSamples {
            symbol: short.symbol.clone(),
            required: self.window,
            actual: short.len(),
          });
        }
        self.window
      }
      ShortSeriesPolicy::Truncate => assets
        .iter()
        .map(AssetReturnSeries::len)
        .min()
        .unwrap_or(0)
        .min(self.window),
    };

    if rows < MIN_SAMPLES {
      let shortest = assets
        .iter()
        .min_by_key(|a| a.len())
        .unwrap_or(&assets[0]);
      return Err(PortfolioError::InsufficientSamples {
        symbol: shortest.symbol.clone(),
        required: MIN_SAMPLES,
        actual: rows.min(shortest.len()),
      });
    }

    for asset in assets {
      if let Some(index) = asset.returns[..rows].iter().position(|r| !r.is_finite()) {
        return Err(PortfolioError::NonFiniteReturn {
          symbol: asset.symbol.clone(),
          index,
        });
      }
    }

    let values = Array2::from_shape_fn((rows, assets.len()), |(t, j)| assets[j].returns[t]);
    let symbols = assets.iter().map(|a| a.symbol.clone()).collect();

    tracing::debug!(
      rows,
      assets = assets.len(),
      policy = ?self.policy,
      "assembled returns matrix"
    );

    Ok(ReturnsMatrix { symbols, values })
  }
}
