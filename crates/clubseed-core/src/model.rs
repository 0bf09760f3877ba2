use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A venue owning a set of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Club {
    /// Run-unique identifier (`club-<n>`).
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
}

/// A scheduled night at a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Event {
    /// Identifier of the form `<club_id>-event-<i>`.
    pub id: String,
    /// Parent club id.
    pub club_id: String,
    pub name: String,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub description: String,
}

/// Occupancy of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Free,
    Reserved,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Reserved => "reserved",
        }
    }

    pub fn is_reserved(self) -> bool {
        matches!(self, Self::Reserved)
    }
}

/// A reservable unit within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    /// Identifier of the form `<event_id>-table-<number>`.
    pub id: String,
    /// Parent event id.
    pub event_id: String,
    /// Table number, 1-based and unique within the event.
    pub number: u32,
    /// Seats at the table, when the profile models capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub status: TableStatus,
    /// Minimum spend, when the profile models pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Booked,
}

/// A booking bound to exactly one reserved table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Reservation {
    /// Identifier of the form `reservation-<table_id>`.
    pub id: String,
    pub event_id: String,
    pub table_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub status: ReservationStatus,
    /// Party size, between 1 and the table capacity.
    pub guests: u32,
    pub created_at: DateTime<Utc>,
}
