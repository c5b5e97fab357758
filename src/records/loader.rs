//! Load portfolio records from CSV files
//!
//! Each dataset has a raw row type matching the file's columns. Rows are
//! decoded with serde and then converted into the typed records, parsing the
//! date columns on the way.

use super::{
    Client, ClientStatus, Deliverable, DeliverableStatus, Engagement, EngagementStatus,
    MonthlySummary,
};
use crate::error::{PortfolioError, PortfolioResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching clients.csv columns
#[derive(Debug, serde::Deserialize)]
struct ClientRow {
    client_id: String,
    client_name: String,
    status: String,
    industry: String,
    manager: String,
    start_date: String,
    contract_value: f64,
}

impl ClientRow {
    fn to_client(self) -> PortfolioResult<Client> {
        Ok(Client {
            client_id: self.client_id,
            client_name: self.client_name,
            status: ClientStatus::from(self.status),
            industry: self.industry,
            manager: self.manager,
            start_date: parse_date("start_date", &self.start_date)?,
            contract_value: self.contract_value,
        })
    }
}

/// Raw CSV row matching engagements.csv columns
#[derive(Debug, serde::Deserialize)]
struct EngagementRow {
    engagement_id: String,
    client_id: String,
    engagement_name: String,
    status: String,
    progress: f64,
    budget_allocated: f64,
    budget_spent: f64,
    start_date: String,
    end_date: String,
}

impl EngagementRow {
    fn to_engagement(self) -> PortfolioResult<Engagement> {
        Ok(Engagement {
            engagement_id: self.engagement_id,
            client_id: self.client_id,
            engagement_name: self.engagement_name,
            status: EngagementStatus::from(self.status),
            progress: self.progress,
            budget_allocated: self.budget_allocated,
            budget_spent: self.budget_spent,
            start_date: parse_date("start_date", &self.start_date)?,
            end_date: parse_date("end_date", &self.end_date)?,
        })
    }
}

/// Raw CSV row matching deliverables.csv columns
#[derive(Debug, serde::Deserialize)]
struct DeliverableRow {
    deliverable_id: String,
    engagement_id: String,
    deliverable_name: String,
    status: String,
    due_date: String,
    completion_date: Option<String>,
    quality_score: Option<f64>,
}

impl DeliverableRow {
    fn to_deliverable(self) -> PortfolioResult<Deliverable> {
        // Unparseable completion dates are coerced to null rather than failing the load
        let completion_date = self
            .completion_date
            .as_deref()
            .and_then(|raw| parse_optional_date("completion_date", raw));

        Ok(Deliverable {
            deliverable_id: self.deliverable_id,
            engagement_id: self.engagement_id,
            deliverable_name: self.deliverable_name,
            status: DeliverableStatus::from(self.status),
            due_date: parse_date("due_date", &self.due_date)?,
            completion_date,
            quality_score: self.quality_score,
        })
    }
}

/// Raw CSV row matching monthly_summaries.csv columns
#[derive(Debug, serde::Deserialize)]
struct MonthlySummaryRow {
    client_id: String,
    year: i32,
    month: u32,
    revenue_generated: f64,
    hours_spent: f64,
    satisfaction_score: f64,
    #[serde(default)]
    key_milestones: String,
    #[serde(default)]
    risks: String,
}

impl MonthlySummaryRow {
    fn to_summary(self) -> PortfolioResult<MonthlySummary> {
        let summary = MonthlySummary {
            client_id: self.client_id,
            year: self.year,
            month: self.month,
            revenue_generated: self.revenue_generated,
            hours_spent: self.hours_spent,
            satisfaction_score: self.satisfaction_score,
            key_milestones: self.key_milestones,
            risks: self.risks,
        };
        if summary.period_start().is_none() {
            return Err(PortfolioError::InvalidPeriod {
                client_id: summary.client_id,
                year: summary.year,
                month: summary.month,
            });
        }
        Ok(summary)
    }
}

/// Parse a required date column.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 timestamps; only
/// the calendar date is kept.
pub fn parse_date(column: &'static str, value: &str) -> PortfolioResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| PortfolioError::InvalidDate {
            column,
            value: value.to_string(),
        })
}

fn parse_optional_date(column: &'static str, value: &str) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    match parse_date(column, value) {
        Ok(date) => Some(date),
        Err(e) => {
            log::warn!("{}; treating as empty", e);
            None
        }
    }
}

fn read_rows<R, T, U, F>(reader: R, convert: F) -> PortfolioResult<Vec<U>>
where
    R: Read,
    T: DeserializeOwned,
    F: Fn(T) -> PortfolioResult<U>,
{
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: T = result?;
        records.push(convert(row)?);
    }

    Ok(records)
}

fn open_existing(path: &Path) -> PortfolioResult<std::fs::File> {
    if !path.exists() {
        return Err(PortfolioError::FileMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::File::open(path)?)
}

/// Load clients from any reader
pub fn load_clients_from_reader<R: Read>(reader: R) -> PortfolioResult<Vec<Client>> {
    read_rows(reader, ClientRow::to_client)
}

/// Load engagements from any reader
pub fn load_engagements_from_reader<R: Read>(reader: R) -> PortfolioResult<Vec<Engagement>> {
    read_rows(reader, EngagementRow::to_engagement)
}

/// Load deliverables from any reader
pub fn load_deliverables_from_reader<R: Read>(reader: R) -> PortfolioResult<Vec<Deliverable>> {
    read_rows(reader, DeliverableRow::to_deliverable)
}

/// Load monthly summaries from any reader
pub fn load_monthly_summaries_from_reader<R: Read>(
    reader: R,
) -> PortfolioResult<Vec<MonthlySummary>> {
    read_rows(reader, MonthlySummaryRow::to_summary)
}

/// Load clients from a CSV file
pub fn load_clients<P: AsRef<Path>>(path: P) -> PortfolioResult<Vec<Client>> {
    load_clients_from_reader(open_existing(path.as_ref())?)
}

/// Load engagements from a CSV file
pub fn load_engagements<P: AsRef<Path>>(path: P) -> PortfolioResult<Vec<Engagement>> {
    load_engagements_from_reader(open_existing(path.as_ref())?)
}

/// Load deliverables from a CSV file
pub fn load_deliverables<P: AsRef<Path>>(path: P) -> PortfolioResult<Vec<Deliverable>> {
    load_deliverables_from_reader(open_existing(path.as_ref())?)
}

/// Load monthly summaries from a CSV file
pub fn load_monthly_summaries<P: AsRef<Path>>(path: P) -> PortfolioResult<Vec<MonthlySummary>> {
    load_monthly_summaries_from_reader(open_existing(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENTS: &str = "\
client_id,client_name,status,industry,manager,start_date,contract_value
C1,Acme Corp,Active,Manufacturing,Dana Lee,2023-01-15,250000
C2,Globex,Prospect,Energy,Sam Ortiz,2023-06-01 00:00:00,0
";

    const DELIVERABLES: &str = "\
deliverable_id,engagement_id,deliverable_name,status,due_date,completion_date,quality_score
D1,E1,Roadmap,Completed,2024-02-01,2024-01-30,92
D2,E1,Pilot,In Progress,2024-05-01,,
D3,E2,Report,Pending,2024-06-01,not a date,75.5
";

    #[test]
    fn test_load_clients_from_reader() {
        let clients = load_clients_from_reader(CLIENTS.as_bytes()).expect("clients should load");
        assert_eq!(clients.len(), 2);

        assert_eq!(clients[0].client_id, "C1");
        assert_eq!(clients[0].status, ClientStatus::Active);
        assert_eq!(clients[0].start_date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(clients[0].contract_value, 250_000.0);

        // Timestamp column keeps only the date; unknown status is preserved
        assert_eq!(clients[1].start_date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(clients[1].status, ClientStatus::Other("Prospect".into()));
    }

    #[test]
    fn test_nullable_deliverable_columns() {
        let deliverables =
            load_deliverables_from_reader(DELIVERABLES.as_bytes()).expect("deliverables should load");
        assert_eq!(deliverables.len(), 3);

        assert_eq!(deliverables[0].completion_date, NaiveDate::from_ymd_opt(2024, 1, 30));
        assert_eq!(deliverables[0].quality_score, Some(92.0));

        assert_eq!(deliverables[1].completion_date, None);
        assert_eq!(deliverables[1].quality_score, None);
        assert_eq!(deliverables[1].status, DeliverableStatus::InProgress);

        // Garbage completion date is coerced to null
        assert_eq!(deliverables[2].completion_date, None);
        assert_eq!(deliverables[2].quality_score, Some(75.5));
    }

    #[test]
    fn test_bad_required_date_fails() {
        let csv = "\
engagement_id,client_id,engagement_name,status,progress,budget_allocated,budget_spent,start_date,end_date
E1,C1,Audit,In Progress,50,1000,1200,2024-01-01,soon
";
        let err = load_engagements_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            PortfolioError::InvalidDate { column, value } => {
                assert_eq!(column, "end_date");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_month_rejected() {
        let csv = "\
client_id,year,month,revenue_generated,hours_spent,satisfaction_score,key_milestones,risks
C1,2024,13,1000,10,4.5,Kickoff,None
";
        let err = load_monthly_summaries_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidPeriod { month: 13, .. }));
    }

    #[test]
    fn test_non_numeric_budget_propagates_csv_error() {
        let csv = "\
engagement_id,client_id,engagement_name,status,progress,budget_allocated,budget_spent,start_date,end_date
E1,C1,Audit,In Progress,50,lots,1200,2024-01-01,2024-06-30
";
        let err = load_engagements_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PortfolioError::Csv(_)));
    }

    #[test]
    fn test_missing_file_names_path() {
        let path = Path::new("definitely/not/here/clients.csv");
        let err = load_clients(path).unwrap_err();
        match &err {
            PortfolioError::FileMissing { path: missing } => assert_eq!(missing, path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("clients.csv"));
    }
}
