use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validate::optional_whole;
use super::{Course, MaterialType, Resource, PLV};

pub static MATERIAL_COLLECTION_NAME: &str = "material";

fn default_university() -> String {
    PLV.to_string()
}

fn default_rating() -> Option<f64> {
    Some(4.8)
}

fn default_downloads() -> Option<i64> {
    Some(0)
}

/// Student-made academic material for sale or free download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Material {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub course: Course,
    /// Subject name, e.g. Data Structures
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    /// Price in PHP; 0 for free
    #[serde(default)]
    #[schema(default = 0.0)]
    #[validate(range(min = 0.0, message = "Input should be greater than or equal to 0."))]
    pub price: f64,
    pub author_name: String,
    #[serde(default = "default_university")]
    #[schema(default = "Pamantasan ng Lungsod ng Valenzuela")]
    pub university: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default = "default_rating")]
    #[schema(default = 4.8)]
    #[validate(range(min = 0.0, max = 5.0, message = "Input should be between 0 and 5."))]
    pub rating: Option<f64>,
    #[serde(default = "default_downloads", deserialize_with = "optional_whole")]
    #[schema(default = 0)]
    #[validate(range(min = 0, message = "Input should be greater than or equal to 0."))]
    pub downloads: Option<i64>,
}

impl Resource for Material {
    const COLLECTION: &'static str = MATERIAL_COLLECTION_NAME;
    const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "course",
        "subject",
        "type",
        "price",
        "author_name",
        "university",
        "file_url",
        "rating",
        "downloads",
    ];
}

impl Material {
    /// Case-insensitive substring match against title or description.
    pub fn mentions(title: &str, description: Option<&str>, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        title.to_lowercase().contains(&needle)
            || description.unwrap_or("").to_lowercase().contains(&needle)
    }
}

/// Request body of `POST /api/materials`.
#[derive(Debug, ToSchema)]
pub struct CreateMaterial {
    pub data: Material,
}
