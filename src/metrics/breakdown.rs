//! Category counts for the status and industry charts

use crate::records::{Client, Deliverable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Count occurrences of each label, most frequent first.
///
/// Labels with equal counts keep the order in which they were first seen.
pub fn count_by<I, S>(labels: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        match counts.iter_mut().find(|c| c.category == label) {
            Some(existing) => existing.count += 1,
            None => counts.push(CategoryCount {
                category: label.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn clients_by_status(clients: &[Client]) -> Vec<CategoryCount> {
    count_by(clients.iter().map(|c| c.status.as_str()))
}

pub fn clients_by_industry(clients: &[Client]) -> Vec<CategoryCount> {
    count_by(clients.iter().map(|c| c.industry.as_str()))
}

pub fn deliverables_by_status(deliverables: &[Deliverable]) -> Vec<CategoryCount> {
    count_by(deliverables.iter().map(|d| d.status.as_str()))
}
