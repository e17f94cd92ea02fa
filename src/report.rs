//! Text report of an optimized portfolio, written under a directory named
//! after its symbols.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

use crate::quant::portfolio::LinalgBackend;
use crate::quant::portfolio::Portfolio;

/// Directory name for a portfolio, e.g. `AAA_BBB`.
pub fn report_name<B: LinalgBackend>(portfolio: &Portfolio<B>) -> String {
  portfolio.symbols().join("_")
}

/// Write `<output_dir>/<SYM1_SYM2...>/portfolio.txt` and return its path.
pub fn write_report<B: LinalgBackend>(
  output_dir: &Path,
  portfolio: &Portfolio<B>,
) -> Result<PathBuf> {
  let dir = output_dir.join(report_name(portfolio));
  fs::create_dir_all(&dir).with_context(|| format!("unable to create {}", dir.display()))?;

  let path = dir.join("portfolio.txt");
  fs::write(&path, portfolio.to_string())
    .with_context(|| format!("unable to write {}", path.display()))?;

  tracing::info!(path = %path.display(), "wrote portfolio report");
  Ok(path)
}
