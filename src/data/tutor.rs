use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{Course, Resource, SessionMode};

pub static TUTOR_COLLECTION_NAME: &str = "tutor";

fn default_modes() -> Vec<SessionMode> {
    vec![SessionMode::OneOnOne]
}

fn default_availability() -> Option<Vec<String>> {
    Some(vec![])
}

fn default_rating() -> Option<f64> {
    Some(4.9)
}

/// Peer tutor available for one-on-one or group sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Tutor {
    pub name: String,
    pub course: Course,
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Hourly rate in PHP
    #[validate(range(min = 0.0, message = "Input should be greater than or equal to 0."))]
    pub rate_per_hour: f64,
    #[serde(default = "default_modes")]
    pub modes: Vec<SessionMode>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Available timeslots, e.g. "Wed 7-9pm"
    #[serde(default = "default_availability")]
    pub availability: Option<Vec<String>>,
    #[serde(default = "default_rating")]
    #[schema(default = 4.9)]
    #[validate(range(min = 0.0, max = 5.0, message = "Input should be between 0 and 5."))]
    pub rating: Option<f64>,
}

impl Resource for Tutor {
    const COLLECTION: &'static str = TUTOR_COLLECTION_NAME;
    const FIELDS: &'static [&'static str] = &[
        "name",
        "course",
        "subjects",
        "rate_per_hour",
        "modes",
        "bio",
        "availability",
        "rating",
    ];
}

impl Tutor {
    /// Case-insensitive substring match against any tutored subject.
    pub fn teaches<'a>(subjects: impl IntoIterator<Item = &'a str>, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        subjects
            .into_iter()
            .any(|it| it.to_lowercase().contains(&needle))
    }
}

/// Request body of `POST /api/tutors`.
#[derive(Debug, ToSchema)]
pub struct CreateTutor {
    pub data: Tutor,
}
