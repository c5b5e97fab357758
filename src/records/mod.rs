//! Portfolio record types and CSV loading

mod data;
pub mod loader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use data::{
    Client, ClientStatus, Deliverable, DeliverableStatus, Engagement, EngagementStatus,
    MonthlySummary,
};
pub use loader::{
    load_clients, load_clients_from_reader, load_deliverables, load_deliverables_from_reader,
    load_engagements, load_engagements_from_reader, load_monthly_summaries,
    load_monthly_summaries_from_reader,
};
