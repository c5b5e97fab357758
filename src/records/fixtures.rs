//! In-memory record builders shared by unit tests

use super::*;
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn client(client_id: &str, status: &str, contract_value: f64) -> Client {
    Client {
        client_id: client_id.to_string(),
        client_name: format!("{client_id} Holdings"),
        status: ClientStatus::from(status),
        industry: "Technology".to_string(),
        manager: "Alex Morgan".to_string(),
        start_date: date(2023, 1, 1),
        contract_value,
    }
}

pub fn engagement(
    engagement_id: &str,
    client_id: &str,
    status: &str,
    progress: f64,
    budget_allocated: f64,
    budget_spent: f64,
) -> Engagement {
    Engagement {
        engagement_id: engagement_id.to_string(),
        client_id: client_id.to_string(),
        engagement_name: format!("{engagement_id} Program"),
        status: EngagementStatus::from(status),
        progress,
        budget_allocated,
        budget_spent,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
    }
}

pub fn deliverable(
    deliverable_id: &str,
    engagement_id: &str,
    status: &str,
    due_date: NaiveDate,
    quality_score: Option<f64>,
) -> Deliverable {
    Deliverable {
        deliverable_id: deliverable_id.to_string(),
        engagement_id: engagement_id.to_string(),
        deliverable_name: format!("{deliverable_id} Package"),
        status: DeliverableStatus::from(status),
        due_date,
        completion_date: None,
        quality_score,
    }
}

pub fn summary(
    client_id: &str,
    year: i32,
    month: u32,
    revenue_generated: f64,
    hours_spent: f64,
    satisfaction_score: f64,
) -> MonthlySummary {
    MonthlySummary {
        client_id: client_id.to_string(),
        year,
        month,
        revenue_generated,
        hours_spent,
        satisfaction_score,
        key_milestones: "Steering review".to_string(),
        risks: "None noted".to_string(),
    }
}
