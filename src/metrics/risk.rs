//! At-risk engagement and deliverable detection

use crate::records::{Deliverable, DeliverableStatus, Engagement, EngagementStatus};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverBudgetEngagement {
    pub engagement_id: String,
    pub engagement_name: String,
    pub budget_allocated: f64,
    pub budget_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PausedEngagement {
    pub engagement_id: String,
    pub engagement_name: String,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueDeliverable {
    pub deliverable_id: String,
    pub deliverable_name: String,
    pub due_date: NaiveDate,
    pub status: DeliverableStatus,
}

/// Three independent risk lists; an item may appear in more than one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtRiskItems {
    pub over_budget_engagements: Vec<OverBudgetEngagement>,
    pub paused_engagements: Vec<PausedEngagement>,
    pub at_risk_deliverables: Vec<OverdueDeliverable>,
}

impl AtRiskItems {
    pub fn is_empty(&self) -> bool {
        self.over_budget_engagements.is_empty()
            && self.paused_engagements.is_empty()
            && self.at_risk_deliverables.is_empty()
    }
}

/// Risk lists evaluated against the local clock at the moment of the call.
///
/// Repeated calls can differ as the clock crosses a due date.
pub fn at_risk_items(engagements: &[Engagement], deliverables: &[Deliverable]) -> AtRiskItems {
    at_risk_items_at(engagements, deliverables, Local::now().naive_local())
}

/// Risk lists evaluated against an explicit instant.
///
/// A deliverable is overdue once `now` is past the start of its due date and
/// it is not completed.
pub fn at_risk_items_at(
    engagements: &[Engagement],
    deliverables: &[Deliverable],
    now: NaiveDateTime,
) -> AtRiskItems {
    let over_budget_engagements = engagements
        .iter()
        .filter(|e| e.is_over_budget())
        .map(|e| OverBudgetEngagement {
            engagement_id: e.engagement_id.clone(),
            engagement_name: e.engagement_name.clone(),
            budget_allocated: e.budget_allocated,
            budget_spent: e.budget_spent,
        })
        .collect();

    let paused_engagements = engagements
        .iter()
        .filter(|e| e.status == EngagementStatus::OnHold)
        .map(|e| PausedEngagement {
            engagement_id: e.engagement_id.clone(),
            engagement_name: e.engagement_name.clone(),
            progress: e.progress,
        })
        .collect();

    let at_risk_deliverables = deliverables
        .iter()
        .filter(|d| d.status != DeliverableStatus::Completed)
        .filter(|d| d.due_date.and_hms_opt(0, 0, 0).is_some_and(|due| due < now))
        .map(|d| OverdueDeliverable {
            deliverable_id: d.deliverable_id.clone(),
            deliverable_name: d.deliverable_name.clone(),
            due_date: d.due_date,
            status: d.status.clone(),
        })
        .collect();

    let items = AtRiskItems {
        over_budget_engagements,
        paused_engagements,
        at_risk_deliverables,
    };
    log::debug!(
        "At-risk scan: {} over budget, {} on hold, {} overdue",
        items.over_budget_engagements.len(),
        items.paused_engagements.len(),
        items.at_risk_deliverables.len(),
    );
    items
}
