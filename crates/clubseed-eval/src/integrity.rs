use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use clubseed_core::{Collection, Dataset, Table, TableStatus};

/// A broken referential or occupancy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub collection: Collection,
    pub id: String,
    pub message: String,
}

impl Violation {
    fn new(code: &str, collection: Collection, id: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            collection,
            id: id.to_string(),
            message: message.into(),
        }
    }
}

/// Check parent references, id uniqueness, table numbering and the
/// reservation/reserved-table pairing. An empty result means the dataset is
/// consistent.
pub fn check_dataset(dataset: &Dataset) -> Vec<Violation> {
    let mut violations = Vec::new();

    let club_ids = unique_ids(
        Collection::Clubs,
        dataset.clubs.iter().map(|club| club.id.as_str()),
        &mut violations,
    );
    let event_ids = unique_ids(
        Collection::Events,
        dataset.events.iter().map(|event| event.id.as_str()),
        &mut violations,
    );
    unique_ids(
        Collection::Tables,
        dataset.tables.iter().map(|table| table.id.as_str()),
        &mut violations,
    );
    unique_ids(
        Collection::Reservations,
        dataset.reservations.iter().map(|r| r.id.as_str()),
        &mut violations,
    );

    for event in &dataset.events {
        if !club_ids.contains(event.club_id.as_str()) {
            violations.push(Violation::new(
                "missing_club",
                Collection::Events,
                &event.id,
                format!("club '{}' does not exist", event.club_id),
            ));
        } else if !event.id.starts_with(&format!("{}-event-", event.club_id)) {
            violations.push(Violation::new(
                "id_prefix_mismatch",
                Collection::Events,
                &event.id,
                format!("id does not extend club id '{}'", event.club_id),
            ));
        }
    }

    check_tables(dataset, &event_ids, &mut violations);
    check_reservations(dataset, &mut violations);

    violations
}

fn check_tables(dataset: &Dataset, event_ids: &HashSet<&str>, violations: &mut Vec<Violation>) {
    let mut tables_per_event: HashMap<&str, u32> = HashMap::new();
    for table in &dataset.tables {
        *tables_per_event.entry(table.event_id.as_str()).or_insert(0) += 1;
    }

    let mut numbers: HashSet<(&str, u32)> = HashSet::new();
    for table in &dataset.tables {
        if !event_ids.contains(table.event_id.as_str()) {
            violations.push(Violation::new(
                "missing_event",
                Collection::Tables,
                &table.id,
                format!("event '{}' does not exist", table.event_id),
            ));
        }

        let upper = tables_per_event
            .get(table.event_id.as_str())
            .copied()
            .unwrap_or(0);
        if table.number == 0 || table.number > upper {
            violations.push(Violation::new(
                "table_number_out_of_range",
                Collection::Tables,
                &table.id,
                format!("number {} outside 1..={upper}", table.number),
            ));
        }
        if !numbers.insert((table.event_id.as_str(), table.number)) {
            violations.push(Violation::new(
                "duplicate_table_number",
                Collection::Tables,
                &table.id,
                format!("number {} repeats in '{}'", table.number, table.event_id),
            ));
        }
    }
}

fn check_reservations(dataset: &Dataset, violations: &mut Vec<Violation>) {
    let tables: HashMap<&str, &Table> = dataset
        .tables
        .iter()
        .map(|table| (table.id.as_str(), table))
        .collect();

    let mut booked: HashSet<&str> = HashSet::new();
    for reservation in &dataset.reservations {
        let Some(table) = tables.get(reservation.table_id.as_str()) else {
            violations.push(Violation::new(
                "missing_table",
                Collection::Reservations,
                &reservation.id,
                format!("table '{}' does not exist", reservation.table_id),
            ));
            continue;
        };

        if table.status != TableStatus::Reserved {
            violations.push(Violation::new(
                "table_not_reserved",
                Collection::Reservations,
                &reservation.id,
                format!("table '{}' is {}", table.id, table.status.as_str()),
            ));
        }
        if table.event_id != reservation.event_id {
            violations.push(Violation::new(
                "event_mismatch",
                Collection::Reservations,
                &reservation.id,
                format!(
                    "reservation event '{}' differs from table event '{}'",
                    reservation.event_id, table.event_id
                ),
            ));
        }
        let over_capacity = table
            .capacity
            .is_some_and(|capacity| reservation.guests > capacity);
        if reservation.guests == 0 || over_capacity {
            violations.push(Violation::new(
                "guests_out_of_range",
                Collection::Reservations,
                &reservation.id,
                format!(
                    "{} guests, capacity {}",
                    reservation.guests,
                    table
                        .capacity
                        .map(|capacity| capacity.to_string())
                        .unwrap_or_else(|| "unset".to_string())
                ),
            ));
        }
        if !booked.insert(reservation.table_id.as_str()) {
            violations.push(Violation::new(
                "double_booking",
                Collection::Reservations,
                &reservation.id,
                format!("table '{}' already has a reservation", reservation.table_id),
            ));
        }
    }

    for table in &dataset.tables {
        if table.status.is_reserved() && !booked.contains(table.id.as_str()) {
            violations.push(Violation::new(
                "missing_reservation",
                Collection::Tables,
                &table.id,
                "reserved table has no reservation",
            ));
        }
    }
}

fn unique_ids<'a>(
    collection: Collection,
    ids: impl Iterator<Item = &'a str>,
    violations: &mut Vec<Violation>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            violations.push(Violation::new("duplicate_id", collection, id, "id repeats"));
        }
    }
    seen
}
