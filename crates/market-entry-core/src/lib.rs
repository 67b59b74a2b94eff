//! Market entry scoring: weighted country risk ratings and five-year
//! economic indicator forecasts.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod risk;
pub mod types;

pub use analysis::batch::{analyze_markets, MarketBatch};
pub use analysis::country::{CountryAnalysis, CountryAnalyzer, MarketStatus};
pub use config::{AnalysisConfig, FitMethod, RiskWeights};
pub use dataset::MarketDataset;
pub use error::MarketEntryError;
pub use types::*;

/// Standard result type for all market-entry operations
pub type MarketEntryResult<T> = Result<T, MarketEntryError>;
