//! Core contracts for clubseed.
//!
//! This crate defines the club/event/table/reservation documents, the
//! `Dataset` bundle passed from generation to persistence, and helpers
//! shared by the store adapters and the CLI.

pub mod collection;
pub mod dataset;
pub mod model;
pub mod redaction;
pub mod schema;

pub use collection::Collection;
pub use dataset::{Dataset, DatasetSummary};
pub use model::{Club, Event, Reservation, ReservationStatus, Table, TableStatus};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use schema::document_schemas;
