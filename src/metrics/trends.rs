//! Monthly trend rows and per-month aggregates

use super::mean;
use crate::error::{PortfolioError, PortfolioResult};
use crate::records::MonthlySummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A monthly summary row with its derived month-start date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub client_id: String,
    pub year: i32,
    pub month: u32,
    pub revenue_generated: f64,
    pub hours_spent: f64,
    pub satisfaction_score: f64,
    pub key_milestones: String,
    pub risks: String,
    /// First day of (year, month)
    pub date: NaiveDate,
}

/// Totals for one calendar month across all clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub date: NaiveDate,
    pub revenue_generated: f64,
    pub hours_spent: f64,
    pub avg_satisfaction: f64,
}

/// Every summary row with its date, oldest first (ties keep input order)
pub fn monthly_trends(summaries: &[MonthlySummary]) -> PortfolioResult<Vec<MonthlyTrend>> {
    let mut trends = summaries
        .iter()
        .map(|s| {
            let date = s.period_start().ok_or_else(|| PortfolioError::InvalidPeriod {
                client_id: s.client_id.clone(),
                year: s.year,
                month: s.month,
            })?;
            Ok(MonthlyTrend {
                client_id: s.client_id.clone(),
                year: s.year,
                month: s.month,
                revenue_generated: s.revenue_generated,
                hours_spent: s.hours_spent,
                satisfaction_score: s.satisfaction_score,
                key_milestones: s.key_milestones.clone(),
                risks: s.risks.clone(),
                date,
            })
        })
        .collect::<PortfolioResult<Vec<_>>>()?;

    trends.sort_by_key(|t| t.date);
    Ok(trends)
}

#[derive(Default)]
struct MonthTotals {
    revenue: f64,
    hours: f64,
    satisfaction: Vec<f64>,
}

/// Group trend rows by date: summed revenue and hours, mean satisfaction.
///
/// Rows may arrive in any order; output is ascending by date.
pub fn aggregate_by_month(trends: &[MonthlyTrend]) -> Vec<MonthlyAggregate> {
    let mut by_date: BTreeMap<NaiveDate, MonthTotals> = BTreeMap::new();
    for trend in trends {
        let entry = by_date.entry(trend.date).or_default();
        entry.revenue += trend.revenue_generated;
        entry.hours += trend.hours_spent;
        entry.satisfaction.push(trend.satisfaction_score);
    }

    by_date
        .into_iter()
        .map(|(date, totals)| MonthlyAggregate {
            date,
            revenue_generated: totals.revenue,
            hours_spent: totals.hours,
            avg_satisfaction: mean(totals.satisfaction).unwrap_or(0.0),
        })
        .collect()
}

/// The `count` most recent rows, newest first
pub fn latest_briefings(trends: &[MonthlyTrend], count: usize) -> Vec<&MonthlyTrend> {
    // Reverse of an ascending stable sort; equal dates come out in reverse input order
    trends.iter().rev().take(count).collect()
}

/// Mean satisfaction over all rows; `None` when there are no rows
pub fn average_satisfaction(trends: &[MonthlyTrend]) -> Option<f64> {
    mean(trends.iter().map(|t| t.satisfaction_score))
}
