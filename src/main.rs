use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use markowitz_rs::config::PortfolioFile;
use markowitz_rs::quant::portfolio::Portfolio;
use markowitz_rs::quant::series::PriceSeries;
use markowitz_rs::report::write_report;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "markowitz")]
#[command(about = "Minimum-variance Markowitz portfolio for a target annual return")]
struct Cli {
  /// Portfolio configuration file
  #[arg(short, long)]
  file: PathBuf,

  /// Override the target annualized return (percent)
  #[arg(long, allow_hyphen_values = true)]
  roi: Option<f64>,

  /// Skip writing the report even if an output directory is configured
  #[arg(long)]
  no_report: bool,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .with(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let cli = Cli::parse();
  let file = PortfolioFile::load(&cli.file)?;
  let roi = cli.roi.unwrap_or(file.roi);

  let mut portfolio = Portfolio::new(file.model.clone());
  for symbol in &file.stocks {
    let prices = PriceSeries::load_from_database(&file.database, symbol)?;
    portfolio
      .add_series(prices.to_return_series())
      .with_context(|| format!("adding {symbol}"))?;
  }

  portfolio
    .optimize(roi)
    .with_context(|| format!("optimizing {} for {roi}% annual return", file.stocks.join(",")))?;
  println!("{portfolio}");

  if let (Some(output), false) = (&file.output, cli.no_report) {
    let path = write_report(output, &portfolio)?;
    println!("report written to {}", path.display());
  }

  Ok(())
}
