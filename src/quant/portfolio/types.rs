//! # Portfolio Types
//!
//! $$
//! \sigma_p=\sqrt{\mathbf w^\top S\,\mathbf w}
//! $$
//!
//! Result container for a Markowitz optimization and its table rendering.

use std::fmt;

use ndarray::Array1;
use prettytable::format;
use prettytable::row;
use prettytable::Table;

/// Output of one successful `optimize` call.
///
/// Annualized figures are percentages. The result is tagged with the
/// asset-set version of the portfolio it was computed for.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationResult {
  pub(crate) symbols: Vec<String>,
  pub(crate) weights: Array1<f64>,
  pub(crate) asset_returns: Array1<f64>,
  pub(crate) asset_volatilities: Array1<f64>,
  pub(crate) portfolio_return: f64,
  pub(crate) portfolio_volatility: f64,
  pub(crate) daily_volatility: f64,
  pub(crate) target_return: f64,
  pub(crate) version: u64,
}

impl OptimizationResult {
  /// Asset symbols, in weight order.
  pub fn symbols(&self) -> &[String] {
    &self.symbols
  }

  /// Portfolio weights; sum to one, may be negative.
  pub fn weights(&self) -> &Array1<f64> {
    &self.weights
  }

  /// Compounded annualized mean return per asset.
  pub fn asset_returns(&self) -> &Array1<f64> {
    &self.asset_returns
  }

  /// Annualized volatility per asset.
  pub fn asset_volatilities(&self) -> &Array1<f64> {
    &self.asset_volatilities
  }

  /// Annualized portfolio return.
  pub fn portfolio_return(&self) -> f64 {
    self.portfolio_return
  }

  /// Annualized portfolio volatility.
  pub fn portfolio_volatility(&self) -> f64 {
    self.portfolio_volatility
  }

  /// Daily portfolio volatility, `sqrt(w S w')`.
  pub fn daily_volatility(&self) -> f64 {
    self.daily_volatility
  }

  /// Target return the optimization was asked for.
  pub fn target_return(&self) -> f64 {
    self.target_return
  }

  /// Asset-set version this result was computed against.
  pub fn version(&self) -> u64 {
    self.version
  }

  /// Weight of `symbol`, if it is part of the result.
  pub fn weight_of(&self, symbol: &str) -> Option<f64> {
    self
      .symbols
      .iter()
      .position(|s| s == symbol)
      .map(|i| self.weights[i])
  }

  pub(crate) fn with_version(mut self, version: u64) -> Self {
    self.version = version;
    self
  }

  fn table(&self) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row!["SYMBOL", "WEIGHT", "RETURN", "VOLATILITY"]);

    for (i, symbol) in self.symbols.iter().enumerate() {
      let weight = format!("{:05.3}", self.weights[i]);
      let ret = format!("{:06.3}%", self.asset_returns[i]);
      let vol = format!("{:06.3}%", self.asset_volatilities[i]);
      table.add_row(row![symbol, weight, ret, vol]);
    }

    table
  }
}

impl fmt::Display for OptimizationResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "efficient portfolio: return={:.3}%, volatility={:.3}%",
      self.portfolio_return, self.portfolio_volatility
    )?;
    writeln!(f)?;
    write!(f, "{}", self.table())
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  fn sample() -> OptimizationResult {
    OptimizationResult {
      symbols: vec!["AAA".to_string(), "BBB".to_string()],
      weights: array![0.75, 0.25],
      asset_returns: array![12.5, 30.25],
      asset_volatilities: array![31.623, 47.434],
      portfolio_return: 20.0,
      portfolio_volatility: 28.5,
      daily_volatility: 0.018,
      target_return: 20.0,
      version: 2,
    }
  }

  #[test]
  fn rendering_lists_every_asset() {
    let text = sample().to_string();

    assert!(text.starts_with("efficient portfolio: return=20.000%, volatility=28.500%"));
    assert!(text.contains("SYMBOL"));
    assert!(text.contains("VOLATILITY"));
    assert!(text.contains("AAA"));
    assert!(text.contains("0.750"));
    assert!(text.contains("12.500%"));
    assert!(text.contains("BBB"));
    assert!(text.contains("47.434%"));
  }

  #[test]
  fn weight_lookup_by_symbol() {
    let result = sample();
    assert_eq!(result.weight_of("BBB"), Some(0.25));
    assert_eq!(result.weight_of("CCC"), None);
  }
}
