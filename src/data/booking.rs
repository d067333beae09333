use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validate::optional_whole;
use super::{BookingStatus, Resource, SessionMode};

pub static BOOKING_COLLECTION_NAME: &str = "booking";

fn default_duration() -> f64 {
    1.0
}

fn default_status() -> BookingStatus {
    BookingStatus::Pending
}

/// Tutoring session request linked to a tutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Booking {
    /// Identifier of the booked tutor, as a 24 character hex string
    pub tutor_id: String,
    pub student_name: String,
    pub student_email: String,
    pub mode: SessionMode,
    /// ISO or human-readable timestamp
    pub session_datetime: String,
    #[serde(default = "default_duration")]
    #[schema(default = 1.0)]
    #[validate(range(exclusive_min = 0.0, message = "Input should be greater than 0."))]
    pub duration_hours: f64,
    #[serde(default, deserialize_with = "optional_whole")]
    #[validate(range(min = 2, message = "Input should be greater than or equal to 2."))]
    pub group_size: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_status")]
    pub status: BookingStatus,
}

impl Resource for Booking {
    const COLLECTION: &'static str = BOOKING_COLLECTION_NAME;
    const FIELDS: &'static [&'static str] = &[
        "tutor_id",
        "student_name",
        "student_email",
        "mode",
        "session_datetime",
        "duration_hours",
        "group_size",
        "notes",
        "status",
    ];
}

/// Request body of `POST /api/bookings`.
#[derive(Debug, ToSchema)]
pub struct CreateBooking {
    pub data: Booking,
}
