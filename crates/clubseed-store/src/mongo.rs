use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Client, Collection as MongoCollection, Database};
use serde_json::Value;

use clubseed_core::Collection;

use crate::adapter::DocumentStore;
use crate::errors::StoreResult;

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "mydb";

/// Document store on MongoDB: one native collection per seeded collection.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect and select the database from the URL path, or [`DEFAULT_DATABASE`].
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        Ok(Self::new(database))
    }

    fn collection(&self, collection: Collection) -> MongoCollection<Document> {
        self.database.collection(collection.as_str())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn engine(&self) -> &'static str {
        "mongodb"
    }

    async fn delete_all(&self, collection: Collection) -> StoreResult<u64> {
        let result = self.collection(collection).delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<u64> {
        if documents.is_empty() {
            return Ok(0);
        }
        let documents = documents
            .iter()
            .map(bson::to_document)
            .collect::<Result<Vec<_>, _>>()?;
        let result = self.collection(collection).insert_many(documents).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        Ok(self.collection(collection).count_documents(doc! {}).await?)
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let mut cursor = self
            .collection(collection)
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .projection(doc! { "_id": 0 })
            .await?;

        let mut documents = Vec::new();
        while cursor.advance().await? {
            let document: Document = cursor.deserialize_current()?;
            documents.push(Bson::Document(document).into_relaxed_extjson());
        }
        Ok(documents)
    }
}
