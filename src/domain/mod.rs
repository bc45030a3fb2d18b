//! Core domain types and logic.

pub mod price_record;
pub mod series;
pub mod indicator;
pub mod signal;
pub mod position;
pub mod backtest;
pub mod recommendation;
pub mod summary;
pub mod metrics;
pub mod strategy;
pub mod config_validation;
pub mod pipeline;
pub mod error;
