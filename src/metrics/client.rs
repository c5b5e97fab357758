//! Per-client detail summary

use crate::error::{PortfolioError, PortfolioResult};
use crate::records::{Client, Deliverable, Engagement, EngagementStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything the client detail view shows for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub client: Client,
    pub engagements: Vec<Engagement>,
    /// Deliverables of the client's engagements
    pub deliverables: Vec<Deliverable>,
    pub total_contract_value: f64,
    pub total_spent: f64,
    pub total_allocated: f64,
    pub active_engagement_count: usize,
    pub completed_engagement_count: usize,
}

/// Detail summary for `client_id`.
///
/// When the id occurs more than once, the first matching client wins.
pub fn client_summary(
    client_id: &str,
    clients: &[Client],
    engagements: &[Engagement],
    deliverables: &[Deliverable],
) -> PortfolioResult<ClientSummary> {
    let client = clients
        .iter()
        .find(|c| c.client_id == client_id)
        .ok_or_else(|| PortfolioError::NotFound {
            client_id: client_id.to_string(),
        })?;

    let client_engagements: Vec<Engagement> = engagements
        .iter()
        .filter(|e| e.client_id == client_id)
        .cloned()
        .collect();

    let engagement_ids: HashSet<&str> = client_engagements
        .iter()
        .map(|e| e.engagement_id.as_str())
        .collect();
    let client_deliverables: Vec<Deliverable> = deliverables
        .iter()
        .filter(|d| engagement_ids.contains(d.engagement_id.as_str()))
        .cloned()
        .collect();

    let count_status = |status: EngagementStatus| {
        client_engagements
            .iter()
            .filter(|e| e.status == status)
            .count()
    };

    Ok(ClientSummary {
        total_contract_value: client.contract_value,
        total_spent: client_engagements.iter().map(|e| e.budget_spent).sum(),
        total_allocated: client_engagements.iter().map(|e| e.budget_allocated).sum(),
        active_engagement_count: count_status(EngagementStatus::InProgress),
        completed_engagement_count: count_status(EngagementStatus::Completed),
        client: client.clone(),
        engagements: client_engagements,
        deliverables: client_deliverables,
    })
}
