//! Record store: loads the four datasets and caches them as one snapshot
//!
//! The cache holds a single `Arc<Portfolio>`. Loading or refreshing builds a
//! complete replacement first and only then swaps the pointer, so readers
//! either see the old four tables or the new four tables, never a mix.
//! Callers that hold an `Arc` keep their snapshot for as long as they need it.

use crate::config::DashboardConfig;
use crate::error::PortfolioResult;
use crate::records::{
    load_clients, load_deliverables, load_engagements, load_monthly_summaries, Client,
    Deliverable, Engagement, MonthlySummary,
};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// The datasets the store knows how to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Clients,
    Engagements,
    Deliverables,
    MonthlySummaries,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Clients,
        Dataset::Engagements,
        Dataset::Deliverables,
        Dataset::MonthlySummaries,
    ];

    /// File name inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Clients => "clients.csv",
            Dataset::Engagements => "engagements.csv",
            Dataset::Deliverables => "deliverables.csv",
            Dataset::MonthlySummaries => "monthly_summaries.csv",
        }
    }
}

/// One consistent, immutable load of all four datasets
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub clients: Vec<Client>,
    pub engagements: Vec<Engagement>,
    pub deliverables: Vec<Deliverable>,
    pub summaries: Vec<MonthlySummary>,
    /// Wall-clock time the snapshot was loaded
    pub loaded_at: DateTime<Local>,
}

impl Portfolio {
    /// Build a snapshot from in-memory records
    pub fn new(
        clients: Vec<Client>,
        engagements: Vec<Engagement>,
        deliverables: Vec<Deliverable>,
        summaries: Vec<MonthlySummary>,
    ) -> Self {
        Self {
            clients,
            engagements,
            deliverables,
            summaries,
            loaded_at: Local::now(),
        }
    }

    /// Load all four datasets from a directory
    pub fn load_from(data_dir: &Path) -> PortfolioResult<Self> {
        let clients = load_clients(data_dir.join(Dataset::Clients.file_name()))?;
        let engagements = load_engagements(data_dir.join(Dataset::Engagements.file_name()))?;
        let deliverables = load_deliverables(data_dir.join(Dataset::Deliverables.file_name()))?;
        let summaries =
            load_monthly_summaries(data_dir.join(Dataset::MonthlySummaries.file_name()))?;

        log::info!(
            "Loaded portfolio from {}: {} clients, {} engagements, {} deliverables, {} monthly summaries",
            data_dir.display(),
            clients.len(),
            engagements.len(),
            deliverables.len(),
            summaries.len(),
        );

        Ok(Self::new(clients, engagements, deliverables, summaries))
    }
}

#[derive(Debug)]
struct CachedPortfolio {
    portfolio: Arc<Portfolio>,
    cached_at: Instant,
}

/// File-backed record store with an atomically swapped snapshot cache
#[derive(Debug)]
pub struct RecordStore {
    data_dir: PathBuf,
    ttl: Option<Duration>,
    cache: RwLock<Option<CachedPortfolio>>,
}

impl RecordStore {
    /// Create a store over a data directory; the cache never expires
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ttl: None,
            cache: RwLock::new(None),
        }
    }

    /// Create a store using the configured data directory and cache lifetime
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.data_dir.clone()).with_ttl(config.cache_ttl())
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of a dataset file
    pub fn path_of(&self, dataset: Dataset) -> PathBuf {
        self.data_dir.join(dataset.file_name())
    }

    /// Datasets whose files are absent from the data directory
    pub fn missing_datasets(&self) -> Vec<Dataset> {
        Dataset::ALL
            .into_iter()
            .filter(|d| !self.path_of(*d).exists())
            .collect()
    }

    /// Current snapshot, loading it on first use or after the TTL lapses
    pub fn portfolio(&self) -> PortfolioResult<Arc<Portfolio>> {
        if let Some(portfolio) = self.cached() {
            return Ok(portfolio);
        }
        self.refresh()
    }

    /// Discard the cached snapshot and load a complete replacement.
    ///
    /// If loading fails the previous snapshot stays in place and the error is
    /// returned.
    pub fn refresh(&self) -> PortfolioResult<Arc<Portfolio>> {
        let portfolio = match Portfolio::load_from(&self.data_dir) {
            Ok(portfolio) => Arc::new(portfolio),
            Err(e) => {
                log::warn!("Refresh of {} failed: {}", self.data_dir.display(), e);
                return Err(e);
            }
        };

        let mut guard = self.cache.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(CachedPortfolio {
            portfolio: Arc::clone(&portfolio),
            cached_at: Instant::now(),
        });
        log::info!("Swapped in new portfolio snapshot");

        Ok(portfolio)
    }

    /// Drop the cached snapshot; the next access reloads from disk
    pub fn invalidate(&self) {
        let mut guard = self.cache.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// Whether a fresh snapshot is currently cached
    pub fn is_cached(&self) -> bool {
        self.cached().is_some()
    }

    fn cached(&self) -> Option<Arc<Portfolio>> {
        let guard = self.cache.read().unwrap_or_else(|e| e.into_inner());
        let entry = guard.as_ref()?;
        if let Some(ttl) = self.ttl {
            if entry.cached_at.elapsed() >= ttl {
                log::debug!("Cached portfolio expired after {:?}", ttl);
                return None;
            }
        }
        Some(Arc::clone(&entry.portfolio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use std::fs;

    const CLIENTS: &str = "\
client_id,client_name,status,industry,manager,start_date,contract_value
C1,Acme Corp,Active,Manufacturing,Dana Lee,2023-01-15,100000
";
    const ENGAGEMENTS: &str = "\
engagement_id,client_id,engagement_name,status,progress,budget_allocated,budget_spent,start_date,end_date
E1,C1,Ops Review,In Progress,50,1000,1200,2024-01-01,2024-06-30
";
    const DELIVERABLES: &str = "\
deliverable_id,engagement_id,deliverable_name,status,due_date,completion_date,quality_score
";
    const SUMMARIES: &str = "\
client_id,year,month,revenue_generated,hours_spent,satisfaction_score,key_milestones,risks
C1,2024,1,12000,80,4.2,Kickoff,Staffing
";

    fn write_all(dir: &Path) {
        fs::write(dir.join("clients.csv"), CLIENTS).unwrap();
        fs::write(dir.join("engagements.csv"), ENGAGEMENTS).unwrap();
        fs::write(dir.join("deliverables.csv"), DELIVERABLES).unwrap();
        fs::write(dir.join("monthly_summaries.csv"), SUMMARIES).unwrap();
    }

    #[test]
    fn test_load_and_cache() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path();
        write_all(dir);

        let store = RecordStore::new(dir);
        assert!(!store.is_cached());

        let first = store.portfolio().expect("portfolio should load");
        assert_eq!(first.clients.len(), 1);
        assert_eq!(first.engagements.len(), 1);
        assert!(first.deliverables.is_empty());
        assert_eq!(first.summaries.len(), 1);
        assert!(store.is_cached());

        // Second access is served from the same snapshot
        let second = store.portfolio().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file_reported() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path();
        write_all(dir);
        fs::remove_file(dir.join("deliverables.csv")).unwrap();

        let store = RecordStore::new(dir);
        assert_eq!(store.missing_datasets(), vec![Dataset::Deliverables]);

        match store.portfolio().unwrap_err() {
            PortfolioError::FileMissing { path } => {
                assert_eq!(path, dir.join("deliverables.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_refresh_swaps_whole_snapshot() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path();
        write_all(dir);

        let store = RecordStore::new(dir);
        let before = store.portfolio().unwrap();

        let two_clients = format!(
            "{CLIENTS}C2,Globex,Paused,Energy,Sam Ortiz,2023-03-01,5000\n"
        );
        fs::write(dir.join("clients.csv"), two_clients).unwrap();

        // Cached snapshot is unchanged until refresh
        assert_eq!(store.portfolio().unwrap().clients.len(), 1);

        let after = store.refresh().unwrap();
        assert_eq!(after.clients.len(), 2);
        assert!(!Arc::ptr_eq(&before, &after));

        // Readers holding the old snapshot still see the old tables
        assert_eq!(before.clients.len(), 1);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path();
        write_all(dir);

        let store = RecordStore::new(dir);
        let before = store.portfolio().unwrap();

        fs::remove_file(dir.join("engagements.csv")).unwrap();
        assert!(store.refresh().is_err());

        let current = store.portfolio().unwrap();
        assert!(Arc::ptr_eq(&before, &current));
    }

    #[test]
    fn test_invalidate_and_ttl() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path();
        write_all(dir);

        let store = RecordStore::new(dir);
        store.portfolio().unwrap();
        store.invalidate();
        assert!(!store.is_cached());

        let expiring = RecordStore::new(dir).with_ttl(Some(Duration::ZERO));
        let first = expiring.portfolio().unwrap();
        assert!(!expiring.is_cached());
        let second = expiring.portfolio().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_snapshot_tables_come_from_one_load() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path();
        write_all(dir);

        let store = RecordStore::new(dir).with_ttl(Some(Duration::ZERO));
        let snapshot = store.portfolio().unwrap();

        let moved = ENGAGEMENTS.replace(",C1,", ",C2,");
        fs::write(dir.join("clients.csv"), CLIENTS.replace("C1,", "C2,")).unwrap();
        fs::write(dir.join("engagements.csv"), moved).unwrap();

        // The held snapshot still pairs its clients with its own engagements
        assert_eq!(snapshot.clients[0].client_id, "C1");
        assert_eq!(snapshot.engagements[0].client_id, "C1");

        let reloaded = store.portfolio().unwrap();
        assert_eq!(reloaded.clients[0].client_id, "C2");
        assert_eq!(reloaded.engagements[0].client_id, "C2");
    }
}
