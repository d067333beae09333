use bson::Document;
use rocket::serde::json::Json;
use rocket::State;

use crate::data::tutor::{CreateTutor, Tutor, TUTOR_COLLECTION_NAME};
use crate::resp::document::{CreatedResponse, ItemsResponse};
use crate::resp::problem::Problem;
use crate::store::Storage;

use super::{create_resource, non_empty, EnvelopeBody};

fn teaches(doc: &Document, subject: &str) -> bool {
    match doc.get_array("subjects") {
        Ok(subjects) => Tutor::teaches(subjects.iter().filter_map(|it| it.as_str()), subject),
        Err(_) => false,
    }
}

/// List tutors, optionally filtered by course and subject
#[utoipa::path(
    responses(
        (status = 200, description = "Tutors matching every given filter", body = ItemsResponse),
        (status = 503, description = "Document store unavailable", body = Problem),
    )
)]
#[get("/tutors?<course>&<subject>")]
#[tracing::instrument(skip(storage))]
pub async fn tutor_list(
    course: Option<String>,
    subject: Option<String>,
    storage: &State<Storage>,
) -> Result<Json<ItemsResponse>, Problem> {
    let store = storage.require()?;

    let mut filter = Document::new();
    if let Some(course) = non_empty(course) {
        filter.insert("course", course);
    }

    let mut docs = store.list(TUTOR_COLLECTION_NAME, filter).await?;

    if let Some(subject) = non_empty(subject) {
        docs.retain(|doc| teaches(doc, &subject));
    }

    Ok(Json(ItemsResponse::from_documents(docs)))
}

/// Create a tutor profile
#[utoipa::path(
    request_body = CreateTutor,
    responses(
        (status = 200, description = "Identifier of the stored tutor", body = CreatedResponse),
        (status = 422, description = "Tutor failed validation", body = Problem),
        (status = 503, description = "Document store unavailable", body = Problem),
    )
)]
#[post("/tutors", data = "<payload>")]
#[tracing::instrument(skip(storage))]
pub async fn tutor_create(
    payload: EnvelopeBody<'_>,
    storage: &State<Storage>,
) -> Result<Json<CreatedResponse>, Problem> {
    let id = create_resource::<Tutor>(payload, storage).await?;
    tracing::info!("Created tutor {}", id);

    Ok(Json(CreatedResponse { id }))
}
