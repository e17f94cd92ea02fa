//! Portfolio run configuration, read from TOML.
//!
//! ```toml
//! database = "data"
//! output = "reports"
//! roi = 12.5
//! stocks = ["AAA", "BBB"]
//!
//! [model]
//! window_length = 250
//! short_series = "truncate"
//! ```

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;

use crate::quant::portfolio::MarkowitzConfig;

/// One portfolio run: where the data lives, what to hold and what to target.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PortfolioFile {
  /// Directory holding `<SYMBOL>/<SYMBOL>.csv` price files.
  pub database: PathBuf,
  /// Report directory; no report is written when absent.
  #[serde(default)]
  pub output: Option<PathBuf>,
  /// Target annualized return, in percent.
  pub roi: f64,
  /// Assets, in column order.
  pub stocks: Vec<String>,
  #[serde(default)]
  pub model: MarkowitzConfig,
}

impl PortfolioFile {
  pub fn from_toml_str(s: &str) -> Result<Self> {
    let file: Self = toml::from_str(s).context("invalid portfolio configuration")?;
    if file.stocks.is_empty() {
      anyhow::bail!("portfolio configuration lists no stocks");
    }
    if !file.roi.is_finite() {
      anyhow::bail!("roi must be a finite percentage");
    }
    Ok(file)
  }

  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
      .with_context(|| format!("unable to read configuration {}", path.display()))?;
    Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
  }
}
