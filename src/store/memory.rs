use std::collections::BTreeMap;

use bson::oid::ObjectId;
use bson::Document;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::error::StoreError;

/// Process-local store keeping collections in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new(name: impl ToString) -> MemoryStore {
        MemoryStore {
            name: name.to_string(),
            collections: RwLock::new(BTreeMap::new()),
        }
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| doc.get(key) == Some(expected))
}

#[rocket::async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        let id = ObjectId::new();

        let mut stored = Document::new();
        stored.insert("_id", id);
        for (key, value) in doc {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(id.to_hex())
    }

    async fn list(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let oid = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| doc.get_object_id("_id").ok() == Some(oid))
                .cloned()
        }))
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.collections.read().await.keys().cloned().collect())
    }
}
