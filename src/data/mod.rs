use bson::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

pub mod booking;
pub mod material;
pub mod tutor;
pub mod validate;

use validate::FieldError;

pub static PLV: &str = "Pamantasan ng Lungsod ng Valenzuela";

/// A closed set of string literals. The wire form of every variant is its
/// literal; anything else fails deserialization.
pub trait Enumerated: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $literal:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $literal)]
                $variant,
            )+
        }

        impl Enumerated for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $literal),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Academic programs offered by the university.
    Course {
        InformationTechnology => "Information Technology",
        ElectricalEngineering => "Electrical Engineering",
        CivilEngineering => "Civil Engineering",
        BusinessAdministration => "Business Administration",
        Education => "Education",
        Nursing => "Nursing",
        Accountancy => "Accountancy",
        HospitalityManagement => "Hospitality Management",
    }
}

string_enum! {
    MaterialType {
        Reviewer => "Reviewer",
        ClassNotes => "Class Notes",
        Handout => "Handout",
        ProblemSet => "Problem Set",
        CheatSheet => "Cheat Sheet",
    }
}

string_enum! {
    /// How a tutoring session is held.
    SessionMode {
        OneOnOne => "One-on-One",
        Group => "Group",
    }
}

string_enum! {
    BookingStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
    }
}

/// A validated document kind stored in its own collection.
pub trait Resource: Serialize + DeserializeOwned + Validate {
    const COLLECTION: &'static str;
    /// Wire names in declaration order; the first failing one is reported.
    const FIELDS: &'static [&'static str];

    /// Reads a client supplied JSON object, filling documented defaults, and
    /// checks the declared bounds.
    fn from_data(data: Map<String, Value>) -> Result<Self, FieldError> {
        let resource: Self = serde_path_to_error::deserialize(Value::Object(data))
            .map_err(FieldError::from_path)?;
        resource
            .validate()
            .map_err(|e| FieldError::from_validation(&e, Self::FIELDS))?;
        Ok(resource)
    }

    fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// POST bodies wrap the resource under a `data` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn resource<R: Resource>(&self) -> Result<R, FieldError> {
        match &self.data {
            Value::Object(map) => R::from_data(map.clone()),
            Value::Null => Err(FieldError::missing("data")),
            _ => Err(FieldError::new("data", "Input should be an object.")),
        }
    }
}
