use bson::{doc, Bson, Document};

use crate::data::material::MATERIAL_COLLECTION_NAME;
use crate::data::tutor::TUTOR_COLLECTION_NAME;
use crate::data::PLV;
use crate::error::StoreError;
use crate::store::{DocumentStore, Storage};

pub fn demo_materials() -> Vec<Document> {
    vec![
        doc! {
            "title": "Data Structures Reviewer",
            "description": "Key concepts + sample problems",
            "course": "Information Technology",
            "subject": "Data Structures",
            "type": "Reviewer",
            "price": 50,
            "author_name": "Alex Cruz",
            "university": PLV,
            "file_url": Bson::Null,
            "rating": 4.9,
            "downloads": 120,
        },
        doc! {
            "title": "Circuit Analysis Handout",
            "description": "Ohm's law to Thevenin",
            "course": "Electrical Engineering",
            "subject": "Circuit Analysis",
            "type": "Handout",
            "price": 0,
            "author_name": "J. Dizon",
            "university": PLV,
            "file_url": Bson::Null,
            "rating": 4.7,
            "downloads": 88,
        },
    ]
}

pub fn demo_tutors() -> Vec<Document> {
    vec![
        doc! {
            "name": "Maria Santos",
            "course": "Information Technology",
            "subjects": ["Programming 1", "Data Structures"],
            "rate_per_hour": 200,
            "modes": ["One-on-One", "Group"],
            "bio": "3rd year IT student, dean's lister",
            "availability": ["Mon 7-9pm", "Wed 8-10pm"],
            "rating": 4.9,
        },
        doc! {
            "name": "Mark Reyes",
            "course": "Civil Engineering",
            "subjects": ["Statics", "Strength of Materials"],
            "rate_per_hour": 250,
            "modes": ["One-on-One"],
            "bio": "Board topnotcher reviewee",
            "availability": ["Sat 2-5pm"],
            "rating": 4.8,
        },
    ]
}

async fn seed_collection(
    store: &dyn DocumentStore,
    collection: &str,
    docs: Vec<Document>,
) -> Result<(), StoreError> {
    if store.count(collection).await? > 0 {
        tracing::debug!("Collection '{}' already populated, not seeding.", collection);
        return Ok(());
    }

    tracing::info!("Seeding {} demo documents into '{}'.", docs.len(), collection);
    for doc in docs {
        store.insert(collection, doc).await?;
    }

    Ok(())
}

/// Inserts demo materials and tutors into empty collections. Never fails:
/// store errors are logged and dropped.
pub async fn seed_demo(storage: &Storage) {
    let store = match storage.backend() {
        Some(store) => store,
        None => return,
    };

    let seeded = async {
        seed_collection(store, MATERIAL_COLLECTION_NAME, demo_materials()).await?;
        seed_collection(store, TUTOR_COLLECTION_NAME, demo_tutors()).await
    };

    if let Err(e) = seeded.await {
        tracing::warn!("Unable to seed demo data: {}", e);
    }
}
