use chrono::{DateTime, TimeZone, Utc};
use clubseed_core::{Collection, Dataset, TableStatus};
use clubseed_eval::{
    DAILY_REPORT_TYPE, build_daily_report, check_dataset, collect_metrics, write_daily_report,
};
use clubseed_generate::{DatasetGenerator, GenerateOptions, Profile};
use clubseed_store::{DocumentStore, MemoryStore, write_dataset};

fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
        .single()
        .expect("valid clock")
}

fn generate(options: GenerateOptions, seed: u64) -> Dataset {
    DatasetGenerator::new(options)
        .expect("valid options")
        .generate_seeded(seed, clock())
}

fn codes(dataset: &Dataset) -> Vec<String> {
    check_dataset(dataset)
        .into_iter()
        .map(|violation| violation.code)
        .collect()
}

#[test]
fn generated_datasets_are_consistent() {
    for profile in [Profile::Fixture, Profile::Randomized] {
        for seed in 0..5 {
            let dataset = generate(profile.options(), seed);
            let violations = check_dataset(&dataset);
            assert!(violations.is_empty(), "{profile} seed {seed}: {violations:?}");
        }
    }
}

#[test]
fn flags_orphaned_children() {
    let mut dataset = generate(Profile::Fixture.options(), 1);
    dataset.events[0].club_id = "club-99".to_string();
    dataset.tables[0].event_id = "club-99-event-1".to_string();

    let codes = codes(&dataset);
    assert!(codes.contains(&"missing_club".to_string()));
    assert!(codes.contains(&"missing_event".to_string()));
}

#[test]
fn flags_reservation_pairing_errors() {
    let mut dataset = generate(Profile::Randomized.options(), 2);

    let free = dataset
        .tables
        .iter()
        .position(|table| table.status == TableStatus::Free)
        .expect("a free table");
    let reserved = dataset
        .tables
        .iter()
        .position(|table| table.status == TableStatus::Reserved)
        .expect("a reserved table");

    dataset.tables[free].status = TableStatus::Reserved;
    dataset.reservations[0].guests = 99;

    let table_id = dataset.tables[reserved].id.clone();
    let mut duplicate = dataset
        .reservations
        .iter()
        .find(|reservation| reservation.table_id == table_id)
        .cloned()
        .expect("reservation for reserved table");
    duplicate.id = "reservation-copy".to_string();
    dataset.reservations.push(duplicate);

    let codes = codes(&dataset);
    assert!(codes.contains(&"missing_reservation".to_string()));
    assert!(codes.contains(&"guests_out_of_range".to_string()));
    assert!(codes.contains(&"double_booking".to_string()));
}

#[test]
fn flags_duplicate_table_numbers() {
    let mut dataset = generate(Profile::Fixture.options(), 3);
    dataset.tables[1].number = 1;
    dataset.tables[2].number = 0;

    let codes = codes(&dataset);
    assert!(codes.contains(&"duplicate_table_number".to_string()));
    assert!(codes.contains(&"table_number_out_of_range".to_string()));
}

#[test]
fn metrics_sum_reserved_prices() {
    let mut options = Profile::Randomized.options();
    options.reservation_probability = 1.0;
    let dataset = generate(options, 4);
    let metrics = collect_metrics(&dataset);

    let expected: u64 = dataset
        .tables
        .iter()
        .filter_map(|table| table.price)
        .map(u64::from)
        .sum();
    assert_eq!(metrics.revenue_estimate, expected);
    assert_eq!(metrics.counts.free_tables, 0);
    assert!((metrics.occupancy_rate - 1.0).abs() < f64::EPSILON);
    assert!(metrics.total_guests >= dataset.reservations.len() as u64);
}

#[tokio::test]
async fn daily_report_reads_store_and_appends_document() {
    let store = MemoryStore::new();
    let dataset = generate(Profile::Randomized.options(), 5);
    write_dataset(&store, &dataset).await.expect("seed store");

    let report = build_daily_report(&store, clock())
        .await
        .expect("build report");
    assert_eq!(report.kind, DAILY_REPORT_TYPE);
    assert_eq!(
        report.metrics.total_reservations,
        dataset.reservations.len() as u64
    );
    assert_eq!(report.metrics.total_tables, 1200);
    assert_eq!(
        report.metrics.reserved_tables + report.metrics.free_tables,
        1200
    );

    write_daily_report(&store, &report).await.expect("write report");
    let stored = store
        .find_all(Collection::Reports)
        .await
        .expect("read reports");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["type"], "DAILY_STATS");
    assert_eq!(stored[0]["id"], report.id.as_str());
}

#[tokio::test]
async fn daily_report_on_empty_store_is_zero() {
    let store = MemoryStore::new();
    let report = build_daily_report(&store, clock())
        .await
        .expect("build report");
    assert_eq!(report.metrics.total_tables, 0);
    assert_eq!(report.metrics.revenue_estimate, 0);
}
