//! Portfolio-level aggregates

use super::mean;
use crate::records::{Client, ClientStatus, Engagement, EngagementStatus};
use serde::{Deserialize, Serialize};

/// Headline counts and totals for the whole portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_clients: usize,
    pub active_clients: usize,
    pub total_contract_value: f64,
    pub total_engagements: usize,
    pub active_engagements: usize,
    pub completed_engagements: usize,
    /// Mean progress of in-progress engagements; `None` when there are none
    pub average_progress: Option<f64>,
}

impl PortfolioSummary {
    /// Completed engagements as a percentage of all engagements
    pub fn completion_rate(&self) -> Option<f64> {
        if self.total_engagements == 0 {
            return None;
        }
        Some(self.completed_engagements as f64 / self.total_engagements as f64 * 100.0)
    }
}

/// Portfolio-wide money totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_contract_value: f64,
    pub total_allocated: f64,
    pub total_spent: f64,
}

pub fn portfolio_summary(clients: &[Client], engagements: &[Engagement]) -> PortfolioSummary {
    let in_progress: Vec<f64> = engagements
        .iter()
        .filter(|e| e.status == EngagementStatus::InProgress)
        .map(|e| e.progress)
        .collect();

    PortfolioSummary {
        total_clients: clients.len(),
        active_clients: clients
            .iter()
            .filter(|c| c.status == ClientStatus::Active)
            .count(),
        total_contract_value: clients.iter().map(|c| c.contract_value).sum(),
        total_engagements: engagements.len(),
        active_engagements: in_progress.len(),
        completed_engagements: engagements
            .iter()
            .filter(|e| e.status == EngagementStatus::Completed)
            .count(),
        average_progress: mean(in_progress),
    }
}

pub fn financial_summary(clients: &[Client], engagements: &[Engagement]) -> FinancialSummary {
    FinancialSummary {
        total_contract_value: clients.iter().map(|c| c.contract_value).sum(),
        total_allocated: engagements.iter().map(|e| e.budget_allocated).sum(),
        total_spent: engagements.iter().map(|e| e.budget_spent).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::fixtures::{client, engagement};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_client_scenario() {
        let clients = vec![client("C1", "Active", 100_000.0)];
        let engagements = vec![engagement("E1", "C1", "In Progress", 50.0, 1000.0, 1200.0)];

        let summary = portfolio_summary(&clients, &engagements);
        assert_eq!(summary.total_clients, 1);
        assert_eq!(summary.active_clients, 1);
        assert_eq!(summary.total_contract_value, 100_000.0);
        assert_eq!(summary.total_engagements, 1);
        assert_eq!(summary.active_engagements, 1);
        assert_eq!(summary.completed_engagements, 0);
        assert_eq!(summary.average_progress, Some(50.0));
    }

    #[test]
    fn test_mixed_statuses() {
        let clients = vec![
            client("C1", "Active", 100.0),
            client("C2", "Paused", 200.0),
            client("C3", "Active", 300.0),
        ];
        let engagements = vec![
            engagement("E1", "C1", "In Progress", 20.0, 10.0, 5.0),
            engagement("E2", "C1", "In Progress", 70.0, 10.0, 5.0),
            engagement("E3", "C2", "Completed", 100.0, 10.0, 10.0),
            engagement("E4", "C3", "On Hold", 40.0, 10.0, 2.0),
        ];

        let summary = portfolio_summary(&clients, &engagements);
        assert_eq!(summary.active_clients, 2);
        assert_abs_diff_eq!(summary.total_contract_value, 600.0);
        assert_eq!(summary.active_engagements, 2);
        assert_eq!(summary.completed_engagements, 1);
        assert_abs_diff_eq!(summary.average_progress.unwrap(), 45.0);
        assert_abs_diff_eq!(summary.completion_rate().unwrap(), 25.0);
    }

    #[test]
    fn test_no_in_progress_is_undefined() {
        let clients = vec![client("C1", "Completed", 0.0)];
        let engagements = vec![engagement("E1", "C1", "Completed", 100.0, 10.0, 10.0)];

        let summary = portfolio_summary(&clients, &engagements);
        assert_eq!(summary.average_progress, None);

        let empty = portfolio_summary(&[], &[]);
        assert_eq!(empty.completion_rate(), None);
        assert_eq!(empty.total_contract_value, 0.0);
    }

    #[test]
    fn test_financial_summary() {
        let clients = vec![client("C1", "Active", 5000.0), client("C2", "Active", 7000.0)];
        let engagements = vec![
            engagement("E1", "C1", "In Progress", 10.0, 1000.0, 400.0),
            engagement("E2", "C2", "Completed", 100.0, 2500.0, 2600.0),
        ];

        let totals = financial_summary(&clients, &engagements);
        assert_abs_diff_eq!(totals.total_contract_value, 12_000.0);
        assert_abs_diff_eq!(totals.total_allocated, 3500.0);
        assert_abs_diff_eq!(totals.total_spent, 3000.0);
    }
}
