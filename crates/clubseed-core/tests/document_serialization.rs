use chrono::{NaiveDate, TimeZone, Utc};
use clubseed_core::{
    Club, Dataset, Event, Reservation, ReservationStatus, Table, TableStatus, document_schemas,
};

fn sample_dataset() -> Dataset {
    Dataset {
        clubs: vec![Club {
            id: "club-1".to_string(),
            name: "Club Riviera".to_string(),
            location: "Rijeka, Hrvatska".to_string(),
            description: "By the sea".to_string(),
        }],
        events: vec![Event {
            id: "club-1-event-1".to_string(),
            club_id: "club-1".to_string(),
            name: "Saturday Beats".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 26).expect("valid date"),
            description: "Opening night".to_string(),
        }],
        tables: vec![
            Table {
                id: "club-1-event-1-table-1".to_string(),
                event_id: "club-1-event-1".to_string(),
                number: 1,
                capacity: None,
                status: TableStatus::Reserved,
                price: None,
            },
            Table {
                id: "club-1-event-1-table-2".to_string(),
                event_id: "club-1-event-1".to_string(),
                number: 2,
                capacity: Some(6),
                status: TableStatus::Free,
                price: Some(120),
            },
        ],
        reservations: vec![Reservation {
            id: "reservation-club-1-event-1-table-1".to_string(),
            event_id: "club-1-event-1".to_string(),
            table_id: "club-1-event-1-table-1".to_string(),
            user_name: None,
            user_email: None,
            status: ReservationStatus::Booked,
            guests: 1,
            created_at: Utc
                .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        }],
    }
}

#[test]
fn serializes_documents_with_snake_case_fields() {
    let dataset = sample_dataset();

    let event = serde_json::to_value(&dataset.events[0]).expect("serialize event");
    assert_eq!(event["date"], "2026-10-26");
    assert_eq!(event["club_id"], "club-1");

    let bare = serde_json::to_value(&dataset.tables[0]).expect("serialize table");
    assert_eq!(bare["status"], "reserved");
    assert!(bare.get("capacity").is_none(), "absent capacity is omitted");
    assert!(bare.get("price").is_none(), "absent price is omitted");

    let priced = serde_json::to_value(&dataset.tables[1]).expect("serialize table");
    assert_eq!(priced["status"], "free");
    assert_eq!(priced["capacity"], 6);
    assert_eq!(priced["price"], 120);

    let reservation = serde_json::to_value(&dataset.reservations[0]).expect("serialize reservation");
    assert_eq!(reservation["status"], "booked");
    assert_eq!(reservation["guests"], 1);
    assert!(reservation.get("user_name").is_none());
    assert!(
        reservation["created_at"]
            .as_str()
            .expect("timestamp string")
            .starts_with("2026-10-19T12:00:00")
    );
}

#[test]
fn documents_deserialize_back_into_entities() {
    let dataset = sample_dataset();
    let json = serde_json::to_string(&dataset).expect("serialize dataset");
    let parsed: Dataset = serde_json::from_str(&json).expect("parse dataset");
    assert_eq!(parsed, dataset);
}

#[test]
fn summary_counts_free_tables() {
    let summary = sample_dataset().summary();
    assert_eq!(summary.clubs, 1);
    assert_eq!(summary.events, 1);
    assert_eq!(summary.tables, 2);
    assert_eq!(summary.reservations, 1);
    assert_eq!(summary.free_tables, 1);
}

#[test]
fn document_schemas_cover_seeded_collections() {
    let schemas = document_schemas();
    for name in ["clubs", "events", "tables", "reservations"] {
        let schema = schemas.get(name).unwrap_or_else(|| panic!("missing schema for {name}"));
        assert!(schema.get("properties").is_some(), "{name} schema has properties");
    }
    let required = schemas["tables"]["required"]
        .as_array()
        .expect("required list");
    assert!(required.iter().any(|field| field == "status"));
}
