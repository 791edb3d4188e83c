use super::{Collection, DocumentStore, StoreError};
use async_trait::async_trait;
use mongodb::bson::Document;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process store for handler tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, mut document: Document) -> Result<(), StoreError> {
        document.insert("_id", mongodb::bson::oid::ObjectId::new());
        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find_all(
        &self,
        collection: Collection,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let documents = collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .take(limit as usize)
                    .map(|document| {
                        let mut projected = document.clone();
                        projected.remove("_id");
                        projected
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
