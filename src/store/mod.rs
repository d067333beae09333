use std::time::Duration;

use bson::Document;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::config::Config;
use crate::error::StoreError;
use crate::resp::problem::{problems, Problem};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;

/// URL scheme selecting the in-process store.
pub static MEMORY_SCHEME: &str = "memory://";

/// Document collections addressed by name. Identifiers are 24 character hex
/// ObjectIds assigned on insertion.
#[rocket::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Logical database name.
    fn name(&self) -> &str;

    /// Persists `doc` and returns the assigned identifier as hex.
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError>;

    /// All documents whose top-level fields equal every entry of `filter`.
    async fn list(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    /// `None` when `id` isn't a valid ObjectId or nothing carries it.
    async fn find_by_id(&self, collection: &str, id: &str)
        -> Result<Option<Document>, StoreError>;

    async fn count(&self, collection: &str) -> Result<u64, StoreError>;

    async fn collection_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Managed handle to the configured store, if any.
pub struct Storage {
    backend: Option<Box<dyn DocumentStore>>,
}

impl Storage {
    pub fn new(backend: impl DocumentStore + 'static) -> Storage {
        Storage {
            backend: Some(Box::new(backend)),
        }
    }

    pub fn unavailable() -> Storage {
        Storage { backend: None }
    }

    pub fn backend(&self) -> Option<&dyn DocumentStore> {
        self.backend.as_deref()
    }

    /// Store for a resource endpoint; answers 503 when none is configured.
    pub fn require(&self) -> Result<&dyn DocumentStore, Problem> {
        self.backend().ok_or_else(problems::store_unconfigured)
    }

    /// Builds the store described by `config`. Any failure leaves the service
    /// running without one.
    pub async fn connect(config: &Config) -> Storage {
        let (url, name) = match config.database() {
            Some(it) => it,
            None => {
                tracing::warn!("DATABASE_URL or DATABASE_NAME not set, running without a store.");
                return Storage::unavailable();
            }
        };

        if url.starts_with(MEMORY_SCHEME) {
            tracing::info!("Using in-memory document store: {}", name);
            return Storage::new(MemoryStore::new(name));
        }

        tracing::info!("Connecting to MongoDB database: {}", name);
        let mut options = match ClientOptions::parse(url).await {
            Ok(options) => options,
            Err(e) => {
                tracing::error!("Unable to parse DATABASE_URL: {}", e);
                return Storage::unavailable();
            }
        };
        options.server_selection_timeout = Some(Duration::from_secs(5));

        match Client::with_options(options) {
            Ok(client) => Storage::new(client.database(name)),
            Err(e) => {
                tracing::error!("Unable to init MongoDB client: {}", e);
                Storage::unavailable()
            }
        }
    }
}
