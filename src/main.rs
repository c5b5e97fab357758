//! Portfolio Dashboard CLI
//!
//! Command-line views over the portfolio metrics

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use portfolio_dashboard::{
    metrics::trends::{aggregate_by_month, latest_briefings},
    metrics::EngagementFilter,
    records::EngagementStatus,
    report::{export_report, ReportKind},
    DashboardConfig, PortfolioAnalyzer, RecordStore,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portfolio_dashboard", version, about = "Client portfolio analytics")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with the four CSV datasets (overrides the config file)
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every dataset file is present
    Check,
    /// Portfolio totals and completion rate
    Summary,
    /// Client health scores, best first
    Health {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Engagement budget and deliverable performance
    Performance,
    /// Engagements filtered by status and minimum progress
    Engagements {
        /// Status to keep (repeatable); all statuses when omitted
        #[arg(long = "status")]
        statuses: Vec<String>,
        #[arg(long = "min-progress", default_value_t = 0.0)]
        min_progress: f64,
    },
    /// Monthly revenue, hours and satisfaction
    Trends {
        /// Number of recent monthly briefings to show
        #[arg(long, default_value_t = 3)]
        latest: usize,
    },
    /// Over-budget, on-hold and overdue items
    AtRisk,
    /// Detail for one client
    Client { client_id: String },
    /// Client and deliverable breakdowns by status and industry
    Breakdown,
    /// Export a CSV report
    Export {
        #[arg(value_enum)]
        kind: ReportKind,
        #[arg(long = "out-dir", default_value = "reports")]
        out_dir: PathBuf,
    },
}

fn check(store: &RecordStore) -> Result<()> {
    let missing = store.missing_datasets();
    for dataset in &missing {
        println!("missing: {}", store.path_of(*dataset).display());
    }
    if !missing.is_empty() {
        anyhow::bail!("{} dataset file(s) missing", missing.len());
    }
    println!("All datasets present in {}", store.data_dir().display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let store = RecordStore::from_config(&config);

    // Check must run before the snapshot load, which fails on missing files
    if let Command::Check = cli.command {
        return check(&store);
    }

    let snapshot = store
        .portfolio()
        .with_context(|| format!("loading data from {}", store.data_dir().display()))?;
    let analyzer = PortfolioAnalyzer::new(&snapshot).with_weights(config.health_weights);
    let date_fmt = config.date_format.as_str();

    match cli.command {
        Command::Check => unreachable!("check returns before the snapshot is loaded"),
        Command::Summary => {
            let summary = analyzer.portfolio_summary();
            let finance = analyzer.financial_summary();
            println!("Portfolio Summary");
            println!("=================");
            println!("  Clients:              {} ({} active)", summary.total_clients, summary.active_clients);
            println!("  Engagements:          {} ({} active)", summary.total_engagements, summary.active_engagements);
            println!("  Completed:            {}", summary.completed_engagements);
            match summary.completion_rate() {
                Some(rate) => println!("  Completion rate:      {:.0}%", rate),
                None => println!("  Completion rate:      n/a"),
            }
            match summary.average_progress {
                Some(progress) => println!("  Avg progress:         {:.0}%", progress),
                None => println!("  Avg progress:         n/a (no engagements in progress)"),
            }
            println!("  Contract value:       ${:.0}", finance.total_contract_value);
            println!("  Budget allocated:     ${:.0}", finance.total_allocated);
            println!("  Budget spent:         ${:.0}", finance.total_spent);
        }
        Command::Health { top } => {
            println!("{:<10} {:<28} {:<12} {:>5} {:>9} {:>8} {:>7}",
                "Client", "Name", "Status", "Engs", "Progress", "Util", "Score");
            println!("{}", "-".repeat(85));
            for h in analyzer.client_health().iter().take(top) {
                println!("{:<10} {:<28} {:<12} {:>5} {:>9.1} {:>7.0}% {:>7.1}",
                    h.client_id,
                    h.client_name,
                    h.status,
                    h.engagement_count,
                    h.avg_progress,
                    h.budget_utilization * 100.0,
                    h.health_score,
                );
            }
        }
        Command::Performance => {
            let mut rows = analyzer.engagement_performance();
            rows.sort_by(|a, b| b.progress.total_cmp(&a.progress));
            println!("{:<10} {:<28} {:<12} {:>8} {:>12} {:>8} {:>9}",
                "Engagement", "Name", "Status", "Progress", "Remaining", "Util", "Deliv %");
            println!("{}", "-".repeat(93));
            for p in &rows {
                let util = p
                    .budget_utilization_pct
                    .map(|u| format!("{:.1}%", u))
                    .unwrap_or_else(|| "n/a".to_string());
                println!("{:<10} {:<28} {:<12} {:>8.0} {:>12.2} {:>8} {:>8.1}%",
                    p.engagement_id,
                    p.engagement_name,
                    p.status,
                    p.progress,
                    p.budget_remaining,
                    util,
                    p.deliverable_completion_pct,
                );
            }
        }
        Command::Engagements { statuses, min_progress } => {
            let filter = EngagementFilter {
                statuses: statuses.iter().map(|s| EngagementStatus::from(s.as_str())).collect(),
                min_progress,
            };
            for e in analyzer.filter_engagements(&filter) {
                println!("{:<10} {:<28} {:<12} {:>5.0}% {} -> {}",
                    e.engagement_id,
                    e.engagement_name,
                    e.status,
                    e.progress,
                    e.start_date.format(date_fmt),
                    e.end_date.format(date_fmt),
                );
            }
        }
        Command::Trends { latest } => {
            let trends = analyzer.monthly_trends()?;
            println!("{:<12} {:>14} {:>10} {:>13}", "Month", "Revenue", "Hours", "Satisfaction");
            println!("{}", "-".repeat(52));
            for month in aggregate_by_month(&trends) {
                println!("{:<12} {:>14.0} {:>10.0} {:>13.2}",
                    month.date.format(date_fmt),
                    month.revenue_generated,
                    month.hours_spent,
                    month.avg_satisfaction,
                );
            }

            println!("\nLatest briefings:");
            for row in latest_briefings(&trends, latest) {
                println!("  {}/{} - {}: revenue ${:.0}, {:.0} hours, satisfaction {:.1}/5.0",
                    row.month, row.year, row.client_id,
                    row.revenue_generated, row.hours_spent, row.satisfaction_score);
                println!("    Milestones: {}", row.key_milestones);
                println!("    Risks:      {}", row.risks);
            }
        }
        Command::AtRisk => {
            let items = analyzer.at_risk_items();

            println!("Over budget engagements:");
            if items.over_budget_engagements.is_empty() {
                println!("  none");
            }
            for e in &items.over_budget_engagements {
                println!("  {:<10} {:<28} allocated ${:.0}, spent ${:.0}",
                    e.engagement_id, e.engagement_name, e.budget_allocated, e.budget_spent);
            }

            println!("\nOn hold engagements:");
            if items.paused_engagements.is_empty() {
                println!("  none");
            }
            for e in &items.paused_engagements {
                println!("  {:<10} {:<28} {:.0}% complete", e.engagement_id, e.engagement_name, e.progress);
            }

            println!("\nOverdue deliverables:");
            if items.at_risk_deliverables.is_empty() {
                println!("  none");
            }
            for d in &items.at_risk_deliverables {
                println!("  {:<10} {:<28} due {} ({})",
                    d.deliverable_id, d.deliverable_name, d.due_date.format(date_fmt), d.status);
            }
        }
        Command::Client { client_id } => {
            let summary = analyzer.client_summary(&client_id)?;
            let c = &summary.client;
            println!("{} ({})", c.client_name, c.client_id);
            println!("  Status:     {}", c.status);
            println!("  Industry:   {}", c.industry);
            println!("  Manager:    {}", c.manager);
            println!("  Start date: {}", c.start_date.format(date_fmt));
            println!("  Contract:   ${:.0}", summary.total_contract_value);
            println!("  Allocated:  ${:.0}", summary.total_allocated);
            println!("  Spent:      ${:.0}", summary.total_spent);
            println!("  Engagements: {} active, {} completed",
                summary.active_engagement_count, summary.completed_engagement_count);

            for e in &summary.engagements {
                println!("    {:<10} {:<28} {:<12} {:>5.0}%",
                    e.engagement_id, e.engagement_name, e.status, e.progress);
            }
            println!("  Deliverables:");
            if summary.deliverables.is_empty() {
                println!("    none");
            }
            for d in &summary.deliverables {
                let quality = d
                    .quality_score
                    .map(|q| format!("{:.0}", q))
                    .unwrap_or_else(|| "-".to_string());
                println!("    {:<10} {:<28} {:<12} due {} quality {}",
                    d.deliverable_id, d.deliverable_name, d.status, d.due_date.format(date_fmt), quality);
            }
        }
        Command::Breakdown => {
            let sections = [
                ("Clients by status", analyzer.clients_by_status()),
                ("Clients by industry", analyzer.clients_by_industry()),
                ("Deliverables by status", analyzer.deliverables_by_status()),
            ];
            for (title, counts) in sections {
                println!("{}:", title);
                for c in counts {
                    println!("  {:<24} {:>5}", c.category, c.count);
                }
            }
        }
        Command::Export { kind, out_dir } => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let path = export_report(kind, &analyzer, &out_dir, Local::now().date_naive())?;
            println!("Report written to {}", path.display());
        }
    }

    Ok(())
}
