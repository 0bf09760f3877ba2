use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use clubseed_core::Collection;

use crate::errors::StoreResult;

/// Rows per INSERT statement, well under the 65535 bind parameter limit.
const INSERT_CHUNK: usize = 1000;

fn table_name(collection: Collection) -> String {
    format!("\"{}\"", collection.as_str())
}

pub async fn ensure_collection(pool: &PgPool, collection: Collection) -> StoreResult<()> {
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\
            seq BIGSERIAL NOT NULL, \
            id TEXT PRIMARY KEY, \
            doc JSONB NOT NULL\
        )",
        table_name(collection)
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}

pub async fn delete_all(pool: &PgPool, collection: Collection) -> StoreResult<u64> {
    let sql = format!("DELETE FROM {}", table_name(collection));
    let result = sqlx::query(&sql).execute(pool).await?;
    Ok(result.rows_affected())
}

/// Insert all rows in one transaction; either the whole batch lands or none of it.
pub async fn insert_documents(
    pool: &PgPool,
    collection: Collection,
    rows: Vec<(String, Value)>,
) -> StoreResult<u64> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0_u64;
    let mut rows = rows.into_iter().peekable();

    while rows.peek().is_some() {
        let chunk: Vec<(String, Value)> = rows.by_ref().take(INSERT_CHUNK).collect();
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("INSERT INTO {} (id, doc) ", table_name(collection)));
        builder.push_values(chunk, |mut row, (id, doc)| {
            row.push_bind(id).push_bind(Json(doc));
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

pub async fn count(pool: &PgPool, collection: Collection) -> StoreResult<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table_name(collection));
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
    Ok(count.max(0) as u64)
}

pub async fn fetch_documents(pool: &PgPool, collection: Collection) -> StoreResult<Vec<Value>> {
    let sql = format!("SELECT doc FROM {} ORDER BY seq", table_name(collection));
    let docs: Vec<Json<Value>> = sqlx::query_scalar(&sql).fetch_all(pool).await?;
    Ok(docs.into_iter().map(|Json(doc)| doc).collect())
}
