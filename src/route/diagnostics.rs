use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::PLV;
use crate::store::Storage;
use crate::util;

#[derive(Debug, Serialize)]
pub struct Identity {
    pub name: String,
    pub message: String,
    pub university: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

/// Store and environment report served by `/test`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn env_flag(key: &str) -> String {
    match util::env_non_empty(key) {
        Some(_) => "✅ Set".to_string(),
        None => "❌ Not Set".to_string(),
    }
}

impl Diagnostics {
    pub async fn gather(storage: &Storage) -> Diagnostics {
        let mut report = Diagnostics {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: env_flag("DATABASE_URL"),
            database_name: env_flag("DATABASE_NAME"),
            connection_status: "Not Connected".to_string(),
            collections: vec![],
        };

        let store = match storage.backend() {
            Some(store) => store,
            None => {
                report.database = "⚠️  Available but not initialized".to_string();
                return report;
            }
        };

        report.database = "✅ Available".to_string();
        report.connection_status = "Connected".to_string();

        match store.collection_names().await {
            Ok(names) => {
                report.collections = names.into_iter().take(10).collect();
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!("Store check of '{}' failed: {}", store.name(), e);
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    util::truncate_chars(e.to_string(), 50)
                );
            }
        }

        report
    }
}

#[get("/")]
pub fn index() -> Json<Identity> {
    Json(Identity {
        name: "LearnHub".to_string(),
        message: "Backend running".to_string(),
        university: PLV.to_string(),
    })
}

/// Greeting used by the client to check reachability
#[utoipa::path(
    responses(
        (status = 200, description = "Greeting", body = Message),
    )
)]
#[get("/hello")]
pub fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from LearnHub backend!".to_string(),
    })
}

#[get("/test")]
#[tracing::instrument(skip(storage))]
pub async fn diagnostic_report(storage: &State<Storage>) -> Json<Diagnostics> {
    Json(Diagnostics::gather(storage).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[rocket::async_test]
    async fn unconfigured_store_is_reported() {
        let report = Diagnostics::gather(&Storage::unavailable()).await;

        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[rocket::async_test]
    async fn collection_listing_is_capped() {
        let storage = Storage::new(MemoryStore::new("test"));
        let store = storage.backend().unwrap();
        for i in 0..12 {
            store
                .insert(&format!("c{:02}", i), bson::doc! {})
                .await
                .unwrap();
        }

        let report = Diagnostics::gather(&storage).await;
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), 10);
        assert_eq!(report.collections[0], "c00");
    }
}
