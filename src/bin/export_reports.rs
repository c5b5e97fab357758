//! Export every CSV report for the portfolio into one directory
//!
//! Usage: export_reports [--data-dir data] [--out-dir reports]

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use portfolio_dashboard::{
    report::{export_report, ReportKind},
    DashboardConfig, PortfolioAnalyzer, RecordStore,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "export_reports", about = "Write all portfolio reports as CSV")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    #[arg(long = "out-dir", default_value = "reports")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }

    let start = Instant::now();
    let store = RecordStore::from_config(&config);
    let snapshot = store
        .portfolio()
        .with_context(|| format!("loading data from {}", store.data_dir().display()))?;
    println!(
        "Loaded {} clients, {} engagements in {:?}",
        snapshot.clients.len(),
        snapshot.engagements.len(),
        start.elapsed()
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let analyzer = PortfolioAnalyzer::new(&snapshot).with_weights(config.health_weights);
    let today = Local::now().date_naive();
    for kind in ReportKind::ALL {
        let path = export_report(kind, &analyzer, &args.out_dir, today)
            .with_context(|| format!("exporting {} report", kind.slug()))?;
        println!("  {:<14} -> {}", kind.slug(), path.display());
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
