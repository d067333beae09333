use bson::{Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Converts a stored document into its wire form: the store's `_id` is removed
/// and re-attached as a hex string under `id`, after all other fields.
pub fn serialize_document(mut doc: Document) -> Value {
    let id = doc.remove("_id");

    let mut out = match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    match id {
        Some(Bson::ObjectId(oid)) => {
            out.insert("id".to_string(), Value::String(oid.to_hex()));
        }
        Some(other) => {
            // Not an ObjectId; keep it under its original key.
            out.insert("_id".to_string(), other.into_relaxed_extjson());
        }
        None => {}
    }

    Value::Object(out)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemsResponse {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
}

impl ItemsResponse {
    pub fn from_documents(docs: impl IntoIterator<Item = Document>) -> ItemsResponse {
        ItemsResponse {
            items: docs.into_iter().map(serialize_document).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingCreatedResponse {
    pub id: String,
    pub status: String,
}
