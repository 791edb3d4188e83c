use super::{Collection, DocumentStore, StoreError};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Database};

/// Process-wide MongoDB handle.
///
/// Created once at startup with [`MongoStore::connect`] and released once
/// with [`MongoStore::shutdown`] after the HTTP server has stopped.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database);
        tracing::info!(database = %database.name(), "document store client created");
        Ok(Self { client, database })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }

    /// Closes connection pools and waits for in-flight operations to finish.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("document store connection closed");
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        self.collection(collection).insert_one(document).await?;
        Ok(())
    }

    async fn find_all(
        &self,
        collection: Collection,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection(collection)
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
