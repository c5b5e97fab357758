//! Metrics engine: pure transformations from portfolio records to derived metrics
//!
//! Every function here takes borrowed tables and returns owned results; none
//! of them mutate their inputs, so they can be called repeatedly and from
//! several readers of the same snapshot.

mod analyzer;
pub mod breakdown;
pub mod client;
pub mod health;
pub mod performance;
pub mod portfolio;
pub mod risk;
pub mod trends;

pub use analyzer::PortfolioAnalyzer;
pub use breakdown::CategoryCount;
pub use client::ClientSummary;
pub use health::{ClientHealth, HealthWeights};
pub use performance::{EngagementFilter, EngagementPerformance};
pub use portfolio::{FinancialSummary, PortfolioSummary};
pub use risk::{AtRiskItems, OverBudgetEngagement, OverdueDeliverable, PausedEngagement};
pub use trends::{MonthlyAggregate, MonthlyTrend};

/// Round to one decimal place (half away from zero)
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean, `None` for an empty sequence
pub(crate) fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(-200.04), -200.0);
        assert_eq!(round1(0.05), 0.1);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean(vec![1.0, 2.0, 4.5]), Some(2.5));
    }
}
