//! # markowitz-rs
//!
//! $$
//! \min_{\mathbf w}\ \mathbf w^\top S\,\mathbf w\quad\text{s.t.}\quad
//! \mathbf w^\top\mu=\mu^\*,\ \mathbf w^\top\mathbf 1=1
//! $$
//!
//! Minimum-variance Markowitz portfolios for a target annualized return,
//! estimated from historical daily returns and solved exactly through the
//! KKT linear system. Short positions are allowed; there is no risk-free
//! asset.
//!
//! ```ignore
//! use markowitz_rs::quant::portfolio::Portfolio;
//!
//! let mut portfolio = Portfolio::default();
//! portfolio.add_asset("AAA", aaa_returns)?;
//! portfolio.add_asset("BBB", bbb_returns)?;
//! let result = portfolio.optimize(12.5)?;
//! println!("{result}");
//! ```

pub mod config;
pub mod quant;
pub mod report;
