use std::env;

use anyhow::{Context, Result};
use chrono::Utc;
use clubseed_core::{Collection, Table};
use clubseed_generate::{DatasetGenerator, Profile};
use clubseed_store::{DocumentStore, MongoStore, open_store, write_dataset};

fn mongo_url() -> Option<String> {
    env::var("TEST_MONGODB_URL").ok()
}

#[tokio::test]
async fn seeds_mongodb_and_replaces_previous_run() -> Result<()> {
    let Some(url) = mongo_url() else {
        eprintln!("skipping: set TEST_MONGODB_URL to run MongoDB tests");
        return Ok(());
    };

    let store = MongoStore::connect(&url)
        .await
        .context("connecting to MongoDB")?;

    let generator = DatasetGenerator::new(Profile::Randomized.options())?;
    let first = generator.generate_seeded(1, Utc::now());
    let second = generator.generate_seeded(2, Utc::now());

    write_dataset(&store, &first).await?;
    let report = write_dataset(&store, &second).await?;

    assert_eq!(report.engine, "mongodb");
    assert_eq!(report.deleted(Collection::Tables), 1200);
    assert_eq!(store.count(Collection::Clubs).await?, 8);
    assert_eq!(
        store.count(Collection::Reservations).await?,
        second.reservations.len() as u64
    );

    let documents = store.find_all(Collection::Tables).await?;
    assert!(documents.iter().all(|doc| doc.get("_id").is_none()));
    let tables: Vec<Table> = documents
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<_, _>>()?;
    assert_eq!(tables, second.tables);

    let boxed = open_store(&url).await?;
    assert_eq!(boxed.engine(), "mongodb");

    Ok(())
}
