pub mod portfolio;
pub mod series;
