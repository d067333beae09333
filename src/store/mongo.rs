use bson::oid::ObjectId;
use bson::{doc, Document};
use mongodb::Database;
use rocket::futures::TryStreamExt;

use super::DocumentStore;
use crate::error::StoreError;

#[rocket::async_trait]
impl DocumentStore for Database {
    fn name(&self) -> &str {
        Database::name(self)
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        let result = self
            .collection::<Document>(collection)
            .insert_one(doc, None)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .ok_or(StoreError::UnexpectedId)
    }

    async fn list(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection::<Document>(collection)
            .find(filter, None)
            .await?;

        Ok(cursor.try_collect().await?)
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

        Ok(self
            .collection::<Document>(collection)
            .find_one(doc! { "_id": oid }, None)
            .await?)
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        Ok(self
            .collection::<Document>(collection)
            .count_documents(doc! {}, None)
            .await?)
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.list_collection_names(None).await?)
    }
}
