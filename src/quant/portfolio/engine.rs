//! # Portfolio Engine
//!
//! $$
//! \mathbf{w}^\* = \operatorname{Optimize}(X, \mu^\*)
//! $$
//!
//! The portfolio aggregate: an ordered asset list, the asset-set version and
//! the last optimization result.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::backend::LinalgBackend;
use super::backend::NalgebraBackend;
use super::data::AssetReturnSeries;
use super::data::ReturnsMatrixBuilder;
use super::data::ShortSeriesPolicy;
use super::data::WINDOW_LENGTH;
use super::error::PortfolioError;
use super::optimizers::optimize_markowitz;
use super::types::OptimizationResult;

/// Model configuration for [`Portfolio`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkowitzConfig {
  /// Number of leading daily returns used per asset.
  pub window_length: usize,
  /// Handling of series shorter than the window.
  pub short_series: ShortSeriesPolicy,
}

impl Default for MarkowitzConfig {
  fn default() -> Self {
    Self {
      window_length: WINDOW_LENGTH,
      short_series: ShortSeriesPolicy::Reject,
    }
  }
}

/// Whether the cached result describes the current asset set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortfolioStatus {
  /// No optimization has succeeded yet.
  Unoptimized,
  /// The cached result matches the current assets.
  Optimized,
  /// Assets were added after the cached result was computed.
  Stale,
}

/// A basket of assets and its minimum-variance allocation.
///
/// Mutation goes through `&mut self`; share it across threads only behind a
/// lock.
#[derive(Clone, Debug)]
pub struct Portfolio<B: LinalgBackend = NalgebraBackend> {
  config: MarkowitzConfig,
  backend: B,
  assets: Vec<AssetReturnSeries>,
  version: u64,
  result: Option<OptimizationResult>,
}

impl Default for Portfolio {
  fn default() -> Self {
    Self::new(MarkowitzConfig::default())
  }
}

impl Portfolio {
  /// Construct a portfolio on the default backend.
  pub fn new(config: MarkowitzConfig) -> Self {
    Self::with_backend(config, NalgebraBackend)
  }
}

impl<B: LinalgBackend> Portfolio<B> {
  /// Construct a portfolio on an explicit linear algebra backend.
  pub fn with_backend(config: MarkowitzConfig, backend: B) -> Self {
    Self {
      config,
      backend,
      assets: Vec::new(),
      version: 0,
      result: None,
    }
  }

  pub fn config(&self) -> &MarkowitzConfig {
    &self.config
  }

  pub fn assets(&self) -> &[AssetReturnSeries] {
    &self.assets
  }

  /// Symbols in insertion (and column) order.
  pub fn symbols(&self) -> Vec<&str> {
    self.assets.iter().map(|a| a.symbol.as_str()).collect()
  }

  pub fn len(&self) -> usize {
    self.assets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }

  /// Asset-set version, bumped by every added asset.
  pub fn version(&self) -> u64 {
    self.version
  }

  /// Append an asset. Symbols must be unique.
  pub fn add_asset(
    &mut self,
    symbol: impl Into<String>,
    returns: Vec<f64>,
  ) -> Result<(), PortfolioError> {
    self.add_series(AssetReturnSeries::new(symbol.into(), returns))
  }

  /// Append an already assembled return series.
  pub fn add_series(&mut self, series: AssetReturnSeries) -> Result<(), PortfolioError> {
    if self.assets.iter().any(|a| a.symbol == series.symbol) {
      return Err(PortfolioError::DuplicateSymbol {
        symbol: series.symbol,
      });
    }

    tracing::debug!(symbol = %series.symbol, samples = series.len(), "added asset");
    self.assets.push(series);
    self.version += 1;
    Ok(())
  }

  /// Minimum-variance weights for an annualized target return in percent.
  ///
  /// On failure the previously cached result is left as it was.
  pub fn optimize(&mut self, target_return: f64) -> Result<&OptimizationResult, PortfolioError> {
    let builder = ReturnsMatrixBuilder::new(self.config.window_length, self.config.short_series);
    let outcome = builder
      .build(&self.assets)
      .and_then(|matrix| optimize_markowitz(&self.backend, &matrix, target_return));

    match outcome {
      Ok(result) => {
        tracing::info!(
          assets = self.assets.len(),
          target_return,
          volatility = result.portfolio_volatility(),
          "optimized portfolio"
        );
        Ok(&*self.result.insert(result.with_version(self.version)))
      }
      Err(err) => {
        tracing::warn!(error = %err, target_return, "optimization failed");
        Err(err)
      }
    }
  }

  /// The cached result, only while it matches the current assets.
  pub fn result(&self) -> Option<&OptimizationResult> {
    self.result.as_ref().filter(|r| r.version() == self.version)
  }

  /// The cached result, even if assets were added since.
  pub fn last_result(&self) -> Option<&OptimizationResult> {
    self.result.as_ref()
  }

  pub fn status(&self) -> PortfolioStatus {
    match &self.result {
      None => PortfolioStatus::Unoptimized,
      Some(r) if r.version() == self.version => PortfolioStatus::Optimized,
      Some(_) => PortfolioStatus::Stale,
    }
  }
}

impl<B: LinalgBackend> fmt::Display for Portfolio<B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.result() {
      Some(result) => write!(f, "{result}"),
      None => writeln!(f, "arbitrary portfolio:  target return has not been specified"),
    }
  }
}

#[cfg(test)]
mod tests {
  use tracing_test::traced_test;

  use super::*;

  fn wave(phase: f64, drift: f64) -> Vec<f64> {
    (0..WINDOW_LENGTH)
      .map(|i| {
        let t = i as f64;
        drift + 0.01 * (0.37 * t + phase).sin() + 0.004 * (1.91 * t + 2.0 * phase).cos()
      })
      .collect()
  }

  fn three_assets() -> Portfolio {
    let mut p = Portfolio::default();
    p.add_asset("AAA", wave(0.0, 0.0005)).unwrap();
    p.add_asset("BBB", wave(1.3, 0.0008)).unwrap();
    p.add_asset("CCC", wave(2.6, 0.0011)).unwrap();
    p
  }

  #[test]
  fn duplicate_symbols_are_rejected() {
    let mut p = three_assets();
    let err = p.add_asset("BBB", wave(0.4, 0.0)).unwrap_err();

    assert_eq!(
      err,
      PortfolioError::DuplicateSymbol {
        symbol: "BBB".to_string()
      }
    );
    assert_eq!(p.len(), 3);
    assert_eq!(p.version(), 3);
  }

  #[test]
  fn symbols_keep_insertion_order() {
    let mut p = Portfolio::default();
    p.add_asset("ZZZ", wave(0.0, 0.0)).unwrap();
    p.add_asset("AAA", wave(1.0, 0.0)).unwrap();

    assert_eq!(p.symbols(), vec!["ZZZ", "AAA"]);
  }

  #[traced_test]
  #[test]
  fn optimize_caches_a_current_result() {
    let mut p = three_assets();
    assert_eq!(p.status(), PortfolioStatus::Unoptimized);

    let weights = p.optimize(20.0).unwrap().weights().clone();
    assert!((weights.sum() - 1.0).abs() < 1e-9);
    assert_eq!(p.status(), PortfolioStatus::Optimized);
    assert_eq!(p.result().map(|r| r.version()), Some(3));
    assert_eq!(p.result().unwrap().symbols(), &["AAA", "BBB", "CCC"]);
    assert!(logs_contain("optimized portfolio"));
  }

  #[test]
  fn adding_an_asset_makes_the_result_stale() {
    let mut p = three_assets();
    p.optimize(20.0).unwrap();
    p.add_asset("DDD", wave(3.9, 0.0002)).unwrap();

    assert_eq!(p.status(), PortfolioStatus::Stale);
    assert!(p.result().is_none());
    assert_eq!(p.last_result().map(|r| r.version()), Some(3));

    p.optimize(20.0).unwrap();
    assert_eq!(p.status(), PortfolioStatus::Optimized);
    assert_eq!(p.result().unwrap().weights().len(), 4);
  }

  #[traced_test]
  #[test]
  fn failed_optimization_keeps_previous_result() {
    let mut p = Portfolio::default();
    p.add_asset("SOLO", wave(0.5, 0.0007)).unwrap();

    let err = p.optimize(99.0).unwrap_err();
    assert!(matches!(err, PortfolioError::UnattainableReturn { .. }));
    assert_eq!(p.status(), PortfolioStatus::Unoptimized);
    assert!(logs_contain("optimization failed"));

    let attainable = match err {
      PortfolioError::UnattainableReturn { attainable, .. } => attainable,
      _ => unreachable!(),
    };
    let before = p.optimize(attainable).unwrap().clone();

    assert!(p.optimize(attainable + 5.0).is_err());
    assert_eq!(p.result(), Some(&before));
  }

  #[test]
  fn singular_failure_after_growth_keeps_old_result() {
    let mut p = three_assets();
    let before = p.optimize(15.0).unwrap().clone();
    p.add_asset("AAA2", wave(0.0, 0.0005)).unwrap();

    let err = p.optimize(15.0).unwrap_err();
    assert!(matches!(err, PortfolioError::SingularSystem { dimension: 6, .. }));
    assert_eq!(p.last_result(), Some(&before));
    assert_eq!(p.status(), PortfolioStatus::Stale);
  }

  #[test]
  fn non_finite_target_keeps_cached_result() {
    let mut p = three_assets();
    let before = p.optimize(12.0).unwrap().clone();

    let err = p.optimize(f64::NAN).unwrap_err();
    assert!(matches!(err, PortfolioError::NonFiniteTarget { .. }));
    assert_eq!(p.result(), Some(&before));
  }

  #[test]
  fn identical_inputs_give_identical_weights() {
    let mut a = three_assets();
    let mut b = three_assets();

    let wa = a.optimize(18.0).unwrap().weights().clone();
    let wb = b.optimize(18.0).unwrap().weights().clone();
    assert_eq!(wa, wb);
  }

  #[test]
  fn truncate_policy_accepts_short_history() {
    let mut p = Portfolio::new(MarkowitzConfig {
      window_length: WINDOW_LENGTH,
      short_series: ShortSeriesPolicy::Truncate,
    });
    p.add_asset("AAA", wave(0.0, 0.0005)).unwrap();
    p.add_asset("BBB", wave(1.3, 0.0008)[..180].to_vec()).unwrap();

    assert!(p.optimize(20.0).is_ok());

    let mut strict = Portfolio::default();
    strict.add_asset("AAA", wave(0.0, 0.0005)).unwrap();
    strict.add_asset("BBB", wave(1.3, 0.0008)[..180].to_vec()).unwrap();
    assert!(matches!(
      strict.optimize(20.0),
      Err(PortfolioError::InsufficientSamples { actual: 180, .. })
    ));
  }

  #[test]
  fn empty_portfolio_cannot_be_optimized() {
    let mut p = Portfolio::default();
    assert_eq!(p.optimize(10.0).unwrap_err(), PortfolioError::EmptyPortfolio);
  }

  #[test]
  fn display_reflects_status() {
    let mut p = three_assets();
    assert_eq!(
      p.to_string(),
      "arbitrary portfolio:  target return has not been specified\n"
    );

    p.optimize(20.0).unwrap();
    let text = p.to_string();
    assert!(text.starts_with("efficient portfolio: return=20.000%"));
    assert!(text.contains("CCC"));
  }

  #[test]
  fn config_defaults() {
    let config = MarkowitzConfig::default();
    assert_eq!(config.window_length, 250);
    assert_eq!(config.short_series, ShortSeriesPolicy::Reject);
  }
}
