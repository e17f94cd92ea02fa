//! # Price Series
//!
//! $$
//! r_n=\frac{c_n-c_{n+1}}{c_{n+1}}
//! $$
//!
//! Daily price history in the Yahoo Finance CSV layout and the daily returns
//! derived from it. Files list the newest session first, so `r_n` is the
//! return earned on day `n` over day `n + 1`.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::quant::portfolio::AssetReturnSeries;

/// One daily session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PriceRecord {
  #[serde(rename = "Date")]
  pub date: NaiveDate,
  #[serde(rename = "Open")]
  pub open: f64,
  #[serde(rename = "High")]
  pub high: f64,
  #[serde(rename = "Low")]
  pub low: f64,
  #[serde(rename = "Close")]
  pub close: f64,
  #[serde(rename = "Volume")]
  pub volume: u64,
  #[serde(rename = "Adj Close")]
  pub adj_close: f64,
}

/// Price history of one symbol, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
  pub symbol: String,
  pub records: Vec<PriceRecord>,
}

impl PriceSeries {
  /// Parse CSV with a `Date,Open,High,Low,Close,Volume,Adj Close` header.
  pub fn from_reader<R: Read>(symbol: &str, reader: R) -> Result<Self> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (line, record) in csv_reader.deserialize().enumerate() {
      let record: PriceRecord =
        record.with_context(|| format!("{symbol}: malformed price record {}", line + 1))?;
      records.push(record);
    }

    Ok(Self {
      symbol: symbol.to_string(),
      records,
    })
  }

  /// Load a CSV file.
  pub fn load<P: AsRef<Path>>(symbol: &str, path: P) -> Result<Self> {
    let path = path.as_ref();
    let file =
      File::open(path).with_context(|| format!("unable to open {}", path.display()))?;
    let series = Self::from_reader(symbol, BufReader::new(file))?;

    tracing::debug!(
      symbol,
      path = %path.display(),
      records = series.records.len(),
      "loaded prices"
    );
    Ok(series)
  }

  /// Load `<root>/<SYMBOL>/<SYMBOL>.csv`.
  pub fn load_from_database<P: AsRef<Path>>(root: P, symbol: &str) -> Result<Self> {
    Self::load(symbol, database_path(root, symbol))
  }

  pub fn closes(&self) -> Vec<f64> {
    self.records.iter().map(|r| r.close).collect()
  }

  /// `(close[n] - close[n+1]) / close[n+1]` over consecutive records.
  pub fn daily_returns(&self) -> Vec<f64> {
    self
      .records
      .windows(2)
      .map(|w| (w[0].close - w[1].close) / w[1].close)
      .collect()
  }

  pub fn to_return_series(&self) -> AssetReturnSeries {
    AssetReturnSeries::new(self.symbol.clone(), self.daily_returns())
  }
}

/// Location of a symbol's price file inside a data directory.
pub fn database_path<P: AsRef<Path>>(root: P, symbol: &str) -> PathBuf {
  root
    .as_ref()
    .join(symbol)
    .join(format!("{symbol}.csv"))
}
