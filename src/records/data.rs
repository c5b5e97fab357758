//! Record types for the four portfolio datasets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a client relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClientStatus {
    Active,
    Completed,
    Paused,
    /// Any status not known to the dashboard, kept verbatim
    Other(String),
}

impl ClientStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Completed => "Completed",
            ClientStatus::Paused => "Paused",
            ClientStatus::Other(s) => s,
        }
    }
}

impl From<&str> for ClientStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Active" => ClientStatus::Active,
            "Completed" => ClientStatus::Completed,
            "Paused" => ClientStatus::Paused,
            other => ClientStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ClientStatus {
    fn from(s: String) -> Self {
        ClientStatus::from(s.as_str())
    }
}

impl From<ClientStatus> for String {
    fn from(status: ClientStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Status of an engagement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EngagementStatus {
    InProgress,
    Completed,
    OnHold,
    Paused,
    Pending,
    Other(String),
}

impl EngagementStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EngagementStatus::InProgress => "In Progress",
            EngagementStatus::Completed => "Completed",
            EngagementStatus::OnHold => "On Hold",
            EngagementStatus::Paused => "Paused",
            EngagementStatus::Pending => "Pending",
            EngagementStatus::Other(s) => s,
        }
    }
}

impl From<&str> for EngagementStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "In Progress" => EngagementStatus::InProgress,
            "Completed" => EngagementStatus::Completed,
            "On Hold" => EngagementStatus::OnHold,
            "Paused" => EngagementStatus::Paused,
            "Pending" => EngagementStatus::Pending,
            other => EngagementStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for EngagementStatus {
    fn from(s: String) -> Self {
        EngagementStatus::from(s.as_str())
    }
}

impl From<EngagementStatus> for String {
    fn from(status: EngagementStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Status of a deliverable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliverableStatus {
    Completed,
    InProgress,
    Pending,
    OnHold,
    Other(String),
}

impl DeliverableStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DeliverableStatus::Completed => "Completed",
            DeliverableStatus::InProgress => "In Progress",
            DeliverableStatus::Pending => "Pending",
            DeliverableStatus::OnHold => "On Hold",
            DeliverableStatus::Other(s) => s,
        }
    }
}

impl From<&str> for DeliverableStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Completed" => DeliverableStatus::Completed,
            "In Progress" => DeliverableStatus::InProgress,
            "Pending" => DeliverableStatus::Pending,
            "On Hold" => DeliverableStatus::OnHold,
            other => DeliverableStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for DeliverableStatus {
    fn from(s: String) -> Self {
        DeliverableStatus::from(s.as_str())
    }
}

impl From<DeliverableStatus> for String {
    fn from(status: DeliverableStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DeliverableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A client of the practice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier (uniqueness is not enforced at load)
    pub client_id: String,
    pub client_name: String,
    pub status: ClientStatus,
    pub industry: String,
    /// Engagement manager responsible for the relationship
    pub manager: String,
    pub start_date: NaiveDate,
    /// Contract value in currency units
    pub contract_value: f64,
}

/// A client project with its own budget and progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub engagement_id: String,
    /// Owning client
    pub client_id: String,
    pub engagement_name: String,
    pub status: EngagementStatus,
    /// Percent complete, 0-100
    pub progress: f64,
    pub budget_allocated: f64,
    /// Amount spent so far; may exceed `budget_allocated`
    pub budget_spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Engagement {
    /// Spent strictly more than allocated
    pub fn is_over_budget(&self) -> bool {
        self.budget_spent > self.budget_allocated
    }
}

/// A trackable work product belonging to one engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub deliverable_id: String,
    /// Owning engagement
    pub engagement_id: String,
    pub deliverable_name: String,
    pub status: DeliverableStatus,
    pub due_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    /// Reviewer quality score, typically 0-100
    pub quality_score: Option<f64>,
}

/// One month of activity for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub client_id: String,
    pub year: i32,
    pub month: u32,
    pub revenue_generated: f64,
    pub hours_spent: f64,
    /// Satisfaction on a 0-5 scale
    pub satisfaction_score: f64,
    pub key_milestones: String,
    pub risks: String,
}

impl MonthlySummary {
    /// First day of the summary's month, `None` if (year, month) is not a calendar month
    pub fn period_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}
