//! Client health scoring
//!
//! The health score blends three components, each on a 0-100 scale:
//! - **progress**: mean progress of the client's in-progress engagements
//! - **budget efficiency**: 100 minus budget utilization (clamped to 0-100)
//! - **activity**: engagement count, capped and scaled to 100
//!
//! ```text
//! score = w_p * avg_progress
//!       + w_b * (100 - clamp(utilization * 100, 0, 100))
//!       + w_a * (min(count, cap) / cap * 100)
//! ```

use super::{mean, round1};
use crate::records::{Client, ClientStatus, Engagement, EngagementStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_progress_weight() -> f64 {
    0.5
}

fn default_budget_weight() -> f64 {
    0.3
}

fn default_activity_weight() -> f64 {
    0.2
}

fn default_activity_cap() -> u32 {
    5
}

/// Tunable weights for the health score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthWeights {
    #[serde(default = "default_progress_weight")]
    pub progress: f64,
    #[serde(default = "default_budget_weight")]
    pub budget_efficiency: f64,
    #[serde(default = "default_activity_weight")]
    pub activity: f64,
    /// Engagement count at which the activity component saturates
    #[serde(default = "default_activity_cap")]
    pub activity_cap: u32,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            progress: default_progress_weight(),
            budget_efficiency: default_budget_weight(),
            activity: default_activity_weight(),
            activity_cap: default_activity_cap(),
        }
    }
}

impl HealthWeights {
    /// Score from the three raw inputs, rounded to one decimal
    pub fn score(&self, avg_progress: f64, budget_utilization: f64, engagement_count: usize) -> f64 {
        let efficiency = 100.0 - (budget_utilization * 100.0).clamp(0.0, 100.0);
        let activity = if self.activity_cap == 0 {
            0.0
        } else {
            let cap = self.activity_cap as usize;
            engagement_count.min(cap) as f64 / cap as f64 * 100.0
        };

        round1(
            self.progress * avg_progress
                + self.budget_efficiency * efficiency
                + self.activity * activity,
        )
    }
}

/// Health metrics for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientHealth {
    pub client_id: String,
    pub client_name: String,
    pub status: ClientStatus,
    pub engagement_count: usize,
    /// Mean progress of in-progress engagements, 0 when none
    pub avg_progress: f64,
    /// Spent / allocated as a ratio, 0 when nothing is allocated
    pub budget_utilization: f64,
    pub health_score: f64,
}

#[derive(Default)]
struct ClientTotals {
    count: usize,
    in_progress: Vec<f64>,
    allocated: f64,
    spent: f64,
}

/// Health records for every client, highest score first.
///
/// Ties keep the input order of `clients`.
pub fn client_health(
    clients: &[Client],
    engagements: &[Engagement],
    weights: &HealthWeights,
) -> Vec<ClientHealth> {
    let mut totals: HashMap<&str, ClientTotals> = HashMap::new();
    for engagement in engagements {
        let entry = totals.entry(engagement.client_id.as_str()).or_default();
        entry.count += 1;
        entry.allocated += engagement.budget_allocated;
        entry.spent += engagement.budget_spent;
        if engagement.status == EngagementStatus::InProgress {
            entry.in_progress.push(engagement.progress);
        }
    }

    let mut health: Vec<ClientHealth> = clients
        .iter()
        .map(|client| {
            let (engagement_count, avg_progress, budget_utilization) =
                match totals.get(client.client_id.as_str()) {
                    Some(t) => {
                        let utilization = if t.allocated == 0.0 {
                            0.0
                        } else {
                            t.spent / t.allocated
                        };
                        let avg = mean(t.in_progress.iter().copied()).unwrap_or(0.0);
                        (t.count, avg, utilization)
                    }
                    None => (0, 0.0, 0.0),
                };

            ClientHealth {
                client_id: client.client_id.clone(),
                client_name: client.client_name.clone(),
                status: client.status.clone(),
                engagement_count,
                avg_progress,
                budget_utilization,
                health_score: weights.score(avg_progress, budget_utilization, engagement_count),
            }
        })
        .collect();

    health.sort_by(|a, b| b.health_score.total_cmp(&a.health_score));
    log::debug!("Scored health for {} clients", health.len());
    health
}
