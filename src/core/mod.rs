//! Configuration and shared data types

pub mod config;
pub mod models;

pub use config::AppConfig;
pub use models::{CombinedSummary, SearchRequest, StrategyId, SummaryResult};
