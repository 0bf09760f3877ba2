use serde::{Deserialize, Serialize};

use crate::model::{Club, Event, Reservation, Table};

/// The four record batches of one generation run, in dependency order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub clubs: Vec<Club>,
    pub events: Vec<Event>,
    pub tables: Vec<Table>,
    pub reservations: Vec<Reservation>,
}

/// Record counts for a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub clubs: usize,
    pub events: usize,
    pub tables: usize,
    pub reservations: usize,
    pub free_tables: usize,
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        let reserved = self
            .tables
            .iter()
            .filter(|table| table.status.is_reserved())
            .count();
        DatasetSummary {
            clubs: self.clubs.len(),
            events: self.events.len(),
            tables: self.tables.len(),
            reservations: self.reservations.len(),
            free_tables: self.tables.len() - reserved,
        }
    }
}
