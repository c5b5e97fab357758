//! Portfolio Dashboard - analytics over a professional-services portfolio
//!
//! This library provides:
//! - Typed loading of the client, engagement, deliverable and monthly summary tables
//! - A record store that caches one consistent snapshot and refreshes it atomically
//! - Portfolio metrics: summaries, client health scores, engagement performance,
//!   monthly trends, at-risk detection and per-client detail
//! - CSV report exports

pub mod config;
pub mod error;
pub mod metrics;
pub mod records;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use error::{PortfolioError, PortfolioResult};
pub use metrics::{HealthWeights, PortfolioAnalyzer};
pub use records::{Client, Deliverable, Engagement, MonthlySummary};
pub use report::ReportKind;
pub use store::{Dataset, Portfolio, RecordStore};
