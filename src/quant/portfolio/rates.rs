//! # Rate Conversions
//!
//! $$
//! r_a = \left((1+r_d)^T-1\right)\cdot 100,\qquad r_d=\left(1+\tfrac{r_a}{100}\right)^{1/T}-1
//! $$
//!
//! Daily/annual conversions by compounding over `T` trading days, plus the
//! linear rescalings the Markowitz solver applies to its target and to
//! volatilities.

use ndarray::Array;
use ndarray::ArrayBase;
use ndarray::Data;
use ndarray::Dimension;

/// Number of trading days in a year.
pub const TRADING_DAYS_PER_YEAR: u32 = 250;

/// Convert an annualized percentage into a compounded daily fraction.
pub fn daily_rate(annual_percent: f64) -> f64 {
  let t = TRADING_DAYS_PER_YEAR as f64;
  (1.0 + annual_percent / 100.0).powf(1.0 / t) - 1.0
}

/// Convert a daily fraction into a compounded annualized percentage.
pub fn annualize_rate(daily: f64) -> f64 {
  let t = TRADING_DAYS_PER_YEAR as f64;
  ((1.0 + daily).powf(t) - 1.0) * 100.0
}

/// Linear conversion of an annualized target percentage into a daily fraction.
pub fn daily_target(annual_percent: f64) -> f64 {
  annual_percent / (TRADING_DAYS_PER_YEAR as f64 * 100.0)
}

/// Inverse of [`daily_target`].
pub fn annual_target(daily: f64) -> f64 {
  daily * TRADING_DAYS_PER_YEAR as f64 * 100.0
}

/// Rescale a daily volatility to an annualized percentage.
///
/// This is `sigma / sqrt(1/T) * 100`, a square-root-of-time approximation
/// rather than the compounded relationship used for returns.
pub fn annualize_volatility(daily_vol: f64) -> f64 {
  let t = TRADING_DAYS_PER_YEAR as f64;
  daily_vol / (1.0 / t).sqrt() * 100.0
}

/// Element-wise rate conversion for scalars and arrays.
pub trait RateConversion {
  type Output;

  /// Annualized percentage to daily fraction.
  fn to_daily_rate(&self) -> Self::Output;

  /// Daily fraction to annualized percentage.
  fn to_annualized_rate(&self) -> Self::Output;
}

impl RateConversion for f64 {
  type Output = f64;

  fn to_daily_rate(&self) -> f64 {
    daily_rate(*self)
  }

  fn to_annualized_rate(&self) -> f64 {
    annualize_rate(*self)
  }
}

impl<S, D> RateConversion for ArrayBase<S, D>
where
  S: Data<Elem = f64>,
  D: Dimension,
{
  type Output = Array<f64, D>;

  fn to_daily_rate(&self) -> Self::Output {
    self.mapv(daily_rate)
  }

  fn to_annualized_rate(&self) -> Self::Output {
    self.mapv(annualize_rate)
  }
}
