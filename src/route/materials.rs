use bson::Document;
use rocket::serde::json::Json;
use rocket::State;

use crate::data::material::{CreateMaterial, Material, MATERIAL_COLLECTION_NAME};
use crate::resp::document::{CreatedResponse, ItemsResponse};
use crate::resp::problem::Problem;
use crate::store::Storage;

use super::{create_resource, non_empty, EnvelopeBody};

fn search_matches(doc: &Document, needle: &str) -> bool {
    let title = doc.get_str("title").unwrap_or("");
    let description = doc.get_str("description").ok();
    Material::mentions(title, description, needle)
}

/// List materials, optionally filtered by course, subject and a free-text query
#[utoipa::path(
    responses(
        (status = 200, description = "Materials matching every given filter", body = ItemsResponse),
        (status = 503, description = "Document store unavailable", body = Problem),
    )
)]
#[get("/materials?<course>&<subject>&<q>")]
#[tracing::instrument(skip(storage))]
pub async fn material_list(
    course: Option<String>,
    subject: Option<String>,
    q: Option<String>,
    storage: &State<Storage>,
) -> Result<Json<ItemsResponse>, Problem> {
    let store = storage.require()?;

    let mut filter = Document::new();
    if let Some(course) = non_empty(course) {
        filter.insert("course", course);
    }
    if let Some(subject) = non_empty(subject) {
        filter.insert("subject", subject);
    }

    let mut docs = store.list(MATERIAL_COLLECTION_NAME, filter).await?;

    if let Some(q) = non_empty(q) {
        docs.retain(|doc| search_matches(doc, &q));
    }

    Ok(Json(ItemsResponse::from_documents(docs)))
}

/// Create a material
#[utoipa::path(
    request_body = CreateMaterial,
    responses(
        (status = 200, description = "Identifier of the stored material", body = CreatedResponse),
        (status = 422, description = "Material failed validation", body = Problem),
        (status = 503, description = "Document store unavailable", body = Problem),
    )
)]
#[post("/materials", data = "<payload>")]
#[tracing::instrument(skip(storage))]
pub async fn material_create(
    payload: EnvelopeBody<'_>,
    storage: &State<Storage>,
) -> Result<Json<CreatedResponse>, Problem> {
    let id = create_resource::<Material>(payload, storage).await?;
    tracing::info!("Created material {}", id);

    Ok(Json(CreatedResponse { id }))
}
