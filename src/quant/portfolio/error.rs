//! # Portfolio Errors
//!
//! Failures of a single `optimize` call. None of them are transient: the
//! caller changes the target or the asset set and calls again.

use thiserror::Error;

/// Portfolio optimization errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
  #[error("portfolio has no assets")]
  EmptyPortfolio,

  #[error("asset {symbol} is already part of the portfolio")]
  DuplicateSymbol { symbol: String },

  #[error("asset {symbol} has {actual} return samples, the sample window requires {required}")]
  InsufficientSamples {
    symbol: String,
    required: usize,
    actual: usize,
  },

  #[error("target return {target} is not a finite percentage")]
  NonFiniteTarget { target: f64 },

  #[error("asset {symbol} has a non-finite return at index {index}")]
  NonFiniteReturn { symbol: String, index: usize },

  #[error(
    "target return {target}% is unattainable: single asset {symbol} only realizes {attainable}%"
  )]
  UnattainableReturn {
    symbol: String,
    target: f64,
    attainable: f64,
  },

  #[error("KKT system of dimension {dimension} is singular for assets {symbols:?}")]
  SingularSystem {
    dimension: usize,
    symbols: Vec<String>,
  },
}
