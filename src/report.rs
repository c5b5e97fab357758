//! CSV report exports
//!
//! Every report is a header row followed by one line per record. Headers are
//! written explicitly so an empty report still carries its columns.

use crate::error::PortfolioResult;
use crate::metrics::PortfolioAnalyzer;
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reports available for download
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    /// Client health scores, best first
    Health,
    /// Budget allocated / spent per engagement
    Financial,
    /// Full engagement performance table
    Performance,
    /// Deliverable status listing
    Deliverables,
    /// Mean satisfaction by month
    Satisfaction,
    /// Monthly summary rows with derived dates
    MonthlyTrends,
}

const HEALTH_COLUMNS: &[&str] = &[
    "client_id",
    "client_name",
    "status",
    "engagement_count",
    "avg_progress",
    "budget_utilization",
    "health_score",
];

const FINANCIAL_COLUMNS: &[&str] = &[
    "engagement_id",
    "engagement_name",
    "budget_allocated",
    "budget_spent",
    "budget_utilization_pct",
];

const PERFORMANCE_COLUMNS: &[&str] = &[
    "engagement_id",
    "client_id",
    "engagement_name",
    "status",
    "progress",
    "budget_allocated",
    "budget_spent",
    "start_date",
    "end_date",
    "budget_remaining",
    "budget_utilization_pct",
    "total_deliverables",
    "completed_deliverables",
    "avg_quality_score",
    "deliverable_completion_pct",
];

const DELIVERABLE_COLUMNS: &[&str] = &[
    "deliverable_id",
    "engagement_id",
    "deliverable_name",
    "status",
    "due_date",
    "completion_date",
    "quality_score",
];

const SATISFACTION_COLUMNS: &[&str] = &["date", "avg_satisfaction"];

const TREND_COLUMNS: &[&str] = &[
    "client_id",
    "year",
    "month",
    "revenue_generated",
    "hours_spent",
    "satisfaction_score",
    "key_milestones",
    "risks",
    "date",
];

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Health,
        ReportKind::Financial,
        ReportKind::Performance,
        ReportKind::Deliverables,
        ReportKind::Satisfaction,
        ReportKind::MonthlyTrends,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Health => "health",
            ReportKind::Financial => "financial",
            ReportKind::Performance => "performance",
            ReportKind::Deliverables => "deliverables",
            ReportKind::Satisfaction => "satisfaction",
            ReportKind::MonthlyTrends => "monthly_trends",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Health => HEALTH_COLUMNS,
            ReportKind::Financial => FINANCIAL_COLUMNS,
            ReportKind::Performance => PERFORMANCE_COLUMNS,
            ReportKind::Deliverables => DELIVERABLE_COLUMNS,
            ReportKind::Satisfaction => SATISFACTION_COLUMNS,
            ReportKind::MonthlyTrends => TREND_COLUMNS,
        }
    }

    /// Download name, e.g. `health_report_20240131.csv`
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}_report_{}.csv", self.slug(), date.format("%Y%m%d"))
    }
}

#[derive(Serialize)]
struct FinancialRow<'a> {
    engagement_id: &'a str,
    engagement_name: &'a str,
    budget_allocated: f64,
    budget_spent: f64,
    budget_utilization_pct: Option<f64>,
}

#[derive(Serialize)]
struct SatisfactionRow {
    date: NaiveDate,
    avg_satisfaction: f64,
}

fn write_rows<W, T, I>(writer: W, columns: &[&str], rows: I) -> PortfolioResult<usize>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(columns)?;

    let mut written = 0;
    for row in rows {
        csv_writer.serialize(row)?;
        written += 1;
    }
    csv_writer.flush()?;
    Ok(written)
}

/// Write a report to any writer, returning the number of data rows
pub fn write_report<W: Write>(
    kind: ReportKind,
    analyzer: &PortfolioAnalyzer<'_>,
    writer: W,
) -> PortfolioResult<usize> {
    let columns = kind.columns();
    let written = match kind {
        ReportKind::Health => write_rows(writer, columns, analyzer.client_health())?,
        ReportKind::Financial => {
            let performance = analyzer.engagement_performance();
            let rows = performance.iter().map(|p| FinancialRow {
                engagement_id: &p.engagement_id,
                engagement_name: &p.engagement_name,
                budget_allocated: p.budget_allocated,
                budget_spent: p.budget_spent,
                budget_utilization_pct: p.budget_utilization_pct,
            });
            write_rows(writer, columns, rows)?
        }
        ReportKind::Performance => write_rows(writer, columns, analyzer.engagement_performance())?,
        ReportKind::Deliverables => {
            write_rows(writer, columns, &analyzer.portfolio().deliverables)?
        }
        ReportKind::Satisfaction => {
            let rows = analyzer
                .monthly_aggregates()?
                .into_iter()
                .map(|m| SatisfactionRow {
                    date: m.date,
                    avg_satisfaction: m.avg_satisfaction,
                });
            write_rows(writer, columns, rows)?
        }
        ReportKind::MonthlyTrends => write_rows(writer, columns, analyzer.monthly_trends()?)?,
    };

    log::debug!("Wrote {} rows to {} report", written, kind.slug());
    Ok(written)
}

/// Write a report into `dir` under its dated download name
pub fn export_report(
    kind: ReportKind,
    analyzer: &PortfolioAnalyzer<'_>,
    dir: &Path,
    date: NaiveDate,
) -> PortfolioResult<PathBuf> {
    let path = dir.join(kind.file_name(date));
    let file = File::create(&path)?;
    let rows = write_report(kind, analyzer, file)?;
    log::info!("Exported {} rows to {}", rows, path.display());
    Ok(path)
}
