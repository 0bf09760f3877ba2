use serde::{Deserialize, Serialize};

use clubseed_core::{Dataset, DatasetSummary, ReservationStatus};

/// Occupancy and revenue figures for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetrics {
    #[serde(flatten)]
    pub counts: DatasetSummary,
    pub reserved_tables: usize,
    /// Reserved share of all tables, 0.0 when there are no tables.
    pub occupancy_rate: f64,
    /// Guests across booked reservations.
    pub total_guests: u64,
    /// Sum of reserved table prices; 0 when prices are not modeled.
    pub revenue_estimate: u64,
}

pub fn collect_metrics(dataset: &Dataset) -> DatasetMetrics {
    let counts = dataset.summary();
    let reserved_tables = counts.tables - counts.free_tables;

    let occupancy_rate = if counts.tables == 0 {
        0.0
    } else {
        reserved_tables as f64 / counts.tables as f64
    };

    let total_guests = dataset
        .reservations
        .iter()
        .filter(|reservation| reservation.status == ReservationStatus::Booked)
        .map(|reservation| u64::from(reservation.guests))
        .sum();

    let revenue_estimate = dataset
        .tables
        .iter()
        .filter(|table| table.status.is_reserved())
        .filter_map(|table| table.price)
        .map(u64::from)
        .sum();

    DatasetMetrics {
        counts,
        reserved_tables,
        occupancy_rate,
        total_guests,
        revenue_estimate,
    }
}
