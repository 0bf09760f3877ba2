use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use clubseed_core::{Collection, Dataset, Reservation, Table};
use clubseed_store::DocumentStore;

use crate::errors::EvalError;
use crate::metrics::collect_metrics;

/// `type` tag of daily statistics documents.
pub const DAILY_REPORT_TYPE: &str = "DAILY_STATS";

/// Statistics snapshot stored in the `reports` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub metrics: DailyMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub total_reservations: u64,
    pub total_tables: u64,
    pub reserved_tables: u64,
    pub free_tables: u64,
    pub total_guests: u64,
    pub revenue_estimate: u64,
}

/// Read tables and reservations from `store` and summarize them.
pub async fn build_daily_report(
    store: &dyn DocumentStore,
    now: DateTime<Utc>,
) -> Result<DailyReport, EvalError> {
    let tables: Vec<Table> = load(store, Collection::Tables).await?;
    let reservations: Vec<Reservation> = load(store, Collection::Reservations).await?;

    let dataset = Dataset {
        tables,
        reservations,
        ..Dataset::default()
    };
    let metrics = collect_metrics(&dataset);

    Ok(DailyReport {
        id: format!("report-{}", uuid::Uuid::new_v4()),
        date: now,
        kind: DAILY_REPORT_TYPE.to_string(),
        metrics: DailyMetrics {
            total_reservations: metrics.counts.reservations as u64,
            total_tables: metrics.counts.tables as u64,
            reserved_tables: metrics.reserved_tables as u64,
            free_tables: metrics.counts.free_tables as u64,
            total_guests: metrics.total_guests,
            revenue_estimate: metrics.revenue_estimate,
        },
    })
}

/// Append `report` to the `reports` collection.
pub async fn write_daily_report(
    store: &dyn DocumentStore,
    report: &DailyReport,
) -> Result<(), EvalError> {
    store
        .insert_one(Collection::Reports, serde_json::to_value(report)?)
        .await?;
    info!(
        event = "report_written",
        report_id = %report.id,
        total_reservations = report.metrics.total_reservations,
        revenue_estimate = report.metrics.revenue_estimate
    );
    Ok(())
}

async fn load<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
) -> Result<Vec<T>, EvalError> {
    store
        .find_all(collection)
        .await?
        .into_iter()
        .map(|document| {
            serde_json::from_value(document).map_err(|source| EvalError::Decode { collection, source })
        })
        .collect()
}
