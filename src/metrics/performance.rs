//! Per-engagement budget and deliverable performance

use super::{mean, round1};
use crate::records::{Deliverable, DeliverableStatus, Engagement, EngagementStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One engagement with its budget and deliverable metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementPerformance {
    pub engagement_id: String,
    pub client_id: String,
    pub engagement_name: String,
    pub status: EngagementStatus,
    pub progress: f64,
    pub budget_allocated: f64,
    pub budget_spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Allocated minus spent; negative when over budget
    pub budget_remaining: f64,
    /// Spent as a percentage of allocated; `None` when nothing is allocated
    pub budget_utilization_pct: Option<f64>,

    pub total_deliverables: usize,
    pub completed_deliverables: usize,
    /// Mean of the non-null quality scores, 0 when there are none
    pub avg_quality_score: f64,
    pub deliverable_completion_pct: f64,
}

#[derive(Default)]
struct DeliverableStats {
    total: usize,
    completed: usize,
    quality_scores: Vec<f64>,
}

/// Performance for every engagement, in input order.
///
/// Engagements without deliverables are kept with zeroed deliverable fields.
pub fn engagement_performance(
    engagements: &[Engagement],
    deliverables: &[Deliverable],
) -> Vec<EngagementPerformance> {
    let mut stats: HashMap<&str, DeliverableStats> = HashMap::new();
    for deliverable in deliverables {
        let entry = stats.entry(deliverable.engagement_id.as_str()).or_default();
        entry.total += 1;
        if deliverable.status == DeliverableStatus::Completed {
            entry.completed += 1;
        }
        if let Some(score) = deliverable.quality_score {
            entry.quality_scores.push(score);
        }
    }

    let empty = DeliverableStats::default();
    engagements
        .iter()
        .map(|e| {
            let s = stats.get(e.engagement_id.as_str()).unwrap_or(&empty);
            let budget_utilization_pct = if e.budget_allocated == 0.0 {
                None
            } else {
                Some(round1(e.budget_spent / e.budget_allocated * 100.0))
            };
            let deliverable_completion_pct = if s.total == 0 {
                0.0
            } else {
                round1(s.completed as f64 / s.total as f64 * 100.0)
            };

            EngagementPerformance {
                engagement_id: e.engagement_id.clone(),
                client_id: e.client_id.clone(),
                engagement_name: e.engagement_name.clone(),
                status: e.status.clone(),
                progress: e.progress,
                budget_allocated: e.budget_allocated,
                budget_spent: e.budget_spent,
                start_date: e.start_date,
                end_date: e.end_date,
                budget_remaining: e.budget_allocated - e.budget_spent,
                budget_utilization_pct,
                total_deliverables: s.total,
                completed_deliverables: s.completed,
                avg_quality_score: round1(mean(s.quality_scores.iter().copied()).unwrap_or(0.0)),
                deliverable_completion_pct,
            }
        })
        .collect()
}

/// Engagement selection used by the analysis view
#[derive(Debug, Clone, Default)]
pub struct EngagementFilter {
    /// Statuses to keep; empty keeps every status
    pub statuses: Vec<EngagementStatus>,
    /// Minimum progress, inclusive
    pub min_progress: f64,
}

impl EngagementFilter {
    pub fn matches(&self, engagement: &Engagement) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&engagement.status))
            && engagement.progress >= self.min_progress
    }

    /// Matching engagements, most progressed first (ties keep input order)
    pub fn apply<'a>(&self, engagements: &'a [Engagement]) -> Vec<&'a Engagement> {
        let mut selected: Vec<&Engagement> =
            engagements.iter().filter(|e| self.matches(e)).collect();
        selected.sort_by(|a, b| b.progress.total_cmp(&a.progress));
        selected
    }
}
