use bson::oid::ObjectId;
use rocket::serde::json::Json;
use rocket::State;

use crate::data::booking::{Booking, CreateBooking};
use crate::data::tutor::TUTOR_COLLECTION_NAME;
use crate::data::{BookingStatus, Resource};
use crate::error::StoreError;
use crate::resp::document::BookingCreatedResponse;
use crate::resp::problem::{problems, Problem};
use crate::store::Storage;

use super::{read_envelope, EnvelopeBody};

/// Request a tutoring session
///
/// The tutor must exist when the booking is stored. Existence is checked and the
/// booking inserted without a transaction.
#[utoipa::path(
    request_body = CreateBooking,
    responses(
        (status = 200, description = "Identifier of the stored booking", body = BookingCreatedResponse),
        (status = 400, description = "tutor_id is not a valid identifier", body = Problem),
        (status = 404, description = "Referenced tutor doesn't exist", body = Problem),
        (status = 422, description = "Booking failed validation", body = Problem),
        (status = 503, description = "Document store unavailable", body = Problem),
    )
)]
#[post("/bookings", data = "<payload>")]
#[tracing::instrument(skip(storage))]
pub async fn booking_create(
    payload: EnvelopeBody<'_>,
    storage: &State<Storage>,
) -> Result<Json<BookingCreatedResponse>, Problem> {
    let booking: Booking = read_envelope(payload)?.resource()?;

    if ObjectId::parse_str(&booking.tutor_id).is_err() {
        return Err(problems::bad_tutor_id(&booking.tutor_id));
    }

    let store = storage.require()?;

    if store
        .find_by_id(TUTOR_COLLECTION_NAME, &booking.tutor_id)
        .await?
        .is_none()
    {
        return Err(problems::tutor_not_found(&booking.tutor_id));
    }

    let doc = booking.to_document().map_err(StoreError::from)?;
    let id = store.insert(Booking::COLLECTION, doc).await?;
    tracing::info!("Booked tutor {} as {}", booking.tutor_id, id);

    Ok(Json(BookingCreatedResponse {
        id,
        status: BookingStatus::Pending.to_string(),
    }))
}
