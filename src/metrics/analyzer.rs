//! Analyzer facade over one portfolio snapshot
//!
//! Borrows the four tables and the health weights so views can call every
//! metric without threading the inputs through by hand. Nothing is memoized:
//! each call recomputes from the snapshot.

use super::breakdown::{self, CategoryCount};
use super::client::{self, ClientSummary};
use super::health::{self, ClientHealth, HealthWeights};
use super::performance::{self, EngagementFilter, EngagementPerformance};
use super::portfolio::{self, FinancialSummary, PortfolioSummary};
use super::risk::{self, AtRiskItems};
use super::trends::{self, MonthlyAggregate, MonthlyTrend};
use crate::error::PortfolioResult;
use crate::records::Engagement;
use crate::store::Portfolio;
use chrono::NaiveDateTime;

/// Metrics entry point for a loaded portfolio
///
/// # Example
/// ```ignore
/// let store = RecordStore::new("data");
/// let snapshot = store.portfolio()?;
/// let analyzer = PortfolioAnalyzer::new(&snapshot);
///
/// for h in analyzer.client_health().iter().take(10) {
///     println!("{} {:.1}", h.client_name, h.health_score);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PortfolioAnalyzer<'a> {
    portfolio: &'a Portfolio,
    weights: HealthWeights,
}

impl<'a> PortfolioAnalyzer<'a> {
    /// Analyzer with the default health weights
    pub fn new(portfolio: &'a Portfolio) -> Self {
        Self {
            portfolio,
            weights: HealthWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: HealthWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn portfolio(&self) -> &'a Portfolio {
        self.portfolio
    }

    pub fn weights(&self) -> &HealthWeights {
        &self.weights
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        portfolio::portfolio_summary(&self.portfolio.clients, &self.portfolio.engagements)
    }

    pub fn financial_summary(&self) -> FinancialSummary {
        portfolio::financial_summary(&self.portfolio.clients, &self.portfolio.engagements)
    }

    pub fn client_health(&self) -> Vec<ClientHealth> {
        health::client_health(
            &self.portfolio.clients,
            &self.portfolio.engagements,
            &self.weights,
        )
    }

    pub fn engagement_performance(&self) -> Vec<EngagementPerformance> {
        performance::engagement_performance(
            &self.portfolio.engagements,
            &self.portfolio.deliverables,
        )
    }

    pub fn filter_engagements(&self, filter: &EngagementFilter) -> Vec<&'a Engagement> {
        filter.apply(&self.portfolio.engagements)
    }

    pub fn monthly_trends(&self) -> PortfolioResult<Vec<MonthlyTrend>> {
        trends::monthly_trends(&self.portfolio.summaries)
    }

    pub fn monthly_aggregates(&self) -> PortfolioResult<Vec<MonthlyAggregate>> {
        Ok(trends::aggregate_by_month(&self.monthly_trends()?))
    }

    pub fn at_risk_items(&self) -> AtRiskItems {
        risk::at_risk_items(&self.portfolio.engagements, &self.portfolio.deliverables)
    }

    pub fn at_risk_items_at(&self, now: NaiveDateTime) -> AtRiskItems {
        risk::at_risk_items_at(&self.portfolio.engagements, &self.portfolio.deliverables, now)
    }

    pub fn client_summary(&self, client_id: &str) -> PortfolioResult<ClientSummary> {
        client::client_summary(
            client_id,
            &self.portfolio.clients,
            &self.portfolio.engagements,
            &self.portfolio.deliverables,
        )
    }

    pub fn clients_by_status(&self) -> Vec<CategoryCount> {
        breakdown::clients_by_status(&self.portfolio.clients)
    }

    pub fn clients_by_industry(&self) -> Vec<CategoryCount> {
        breakdown::clients_by_industry(&self.portfolio.clients)
    }

    pub fn deliverables_by_status(&self) -> Vec<CategoryCount> {
        breakdown::deliverables_by_status(&self.portfolio.deliverables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use crate::records::fixtures::{client, engagement, summary};
    use crate::records::EngagementStatus;

    fn scenario() -> Portfolio {
        Portfolio::new(
            vec![client("C1", "Active", 100_000.0)],
            vec![engagement("E1", "C1", "In Progress", 50.0, 1000.0, 1200.0)],
            vec![],
            vec![summary("C1", 2024, 5, 9000.0, 70.0, 4.1)],
        )
    }

    #[test]
    fn test_single_engagement_scenario_end_to_end() {
        let portfolio = scenario();
        let analyzer = PortfolioAnalyzer::new(&portfolio);

        let summary = analyzer.portfolio_summary();
        assert_eq!(summary.total_clients, 1);
        assert_eq!(summary.active_clients, 1);
        assert_eq!(summary.total_engagements, 1);
        assert_eq!(summary.active_engagements, 1);
        assert_eq!(summary.average_progress, Some(50.0));

        let risks = analyzer.at_risk_items();
        assert_eq!(risks.over_budget_engagements.len(), 1);
        assert_eq!(risks.over_budget_engagements[0].engagement_id, "E1");

        let perf = analyzer.engagement_performance();
        assert_eq!(perf[0].budget_remaining, -200.0);
        assert_eq!(perf[0].budget_utilization_pct, Some(120.0));
        assert_eq!(perf[0].total_deliverables, 0);
        assert_eq!(perf[0].deliverable_completion_pct, 0.0);
    }

    #[test]
    fn test_weights_flow_into_health() {
        let portfolio = scenario();
        let default_score = PortfolioAnalyzer::new(&portfolio).client_health()[0].health_score;

        let progress_only = HealthWeights {
            progress: 1.0,
            budget_efficiency: 0.0,
            activity: 0.0,
            activity_cap: 5,
        };
        let tuned = PortfolioAnalyzer::new(&portfolio).with_weights(progress_only);
        assert_eq!(tuned.client_health()[0].health_score, 50.0);
        // 0.5*50 + 0.3*0 + 0.2*20
        assert_eq!(default_score, 29.0);
    }

    #[test]
    fn test_views_share_the_snapshot() {
        let portfolio = scenario();
        let analyzer = PortfolioAnalyzer::new(&portfolio);

        let filter = EngagementFilter {
            statuses: vec![EngagementStatus::OnHold],
            min_progress: 0.0,
        };
        assert!(analyzer.filter_engagements(&filter).is_empty());
        assert_eq!(analyzer.monthly_aggregates().unwrap().len(), 1);
        assert_eq!(analyzer.clients_by_status()[0].count, 1);
        assert!(matches!(
            analyzer.client_summary("nope"),
            Err(PortfolioError::NotFound { .. })
        ));
    }
}
