//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Markowitz minimum-variance allocation for a target return.

pub mod backend;
pub mod covariance;
pub mod data;
pub mod engine;
pub mod error;
pub mod optimizers;
pub mod rates;
pub mod types;

pub use backend::LinalgBackend;
pub use backend::NalgebraBackend;
pub use covariance::estimate_moments;
pub use covariance::ReturnMoments;
pub use data::AssetReturnSeries;
pub use data::ReturnsMatrix;
pub use data::ReturnsMatrixBuilder;
pub use data::ShortSeriesPolicy;
pub use data::WINDOW_LENGTH;
pub use engine::MarkowitzConfig;
pub use engine::Portfolio;
pub use engine::PortfolioStatus;
pub use error::PortfolioError;
pub use optimizers::build_kkt_system;
pub use optimizers::optimize_markowitz;
pub use optimizers::portfolio_variance;
pub use optimizers::solve_kkt;
pub use optimizers::KktSolution;
pub use rates::annualize_rate;
pub use rates::annualize_volatility;
pub use rates::daily_rate;
pub use rates::daily_target;
pub use rates::RateConversion;
pub use rates::TRADING_DAYS_PER_YEAR;
pub use types::OptimizationResult;
