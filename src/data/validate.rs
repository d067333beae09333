//! Conversion of deserialization and validation failures into the first
//! offending field, plus number readers shared by the resource schemas.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use validator::ValidationErrors;

use crate::resp::problem::{problems, Problem};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl ToString, reason: impl ToString) -> FieldError {
        FieldError {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(field: impl ToString) -> FieldError {
        FieldError::new(field, "Field required.")
    }

    /// Names the field a deserialization error occurred in. Missing fields are
    /// reported by serde at the enclosing object, so their name is taken from
    /// the message.
    pub fn from_path(e: serde_path_to_error::Error<serde_json::Error>) -> FieldError {
        use serde_path_to_error::Segment;

        let field = e
            .path()
            .iter()
            .map(|segment| match segment {
                Segment::Seq { index } => index.to_string(),
                Segment::Map { key } => key.clone(),
                Segment::Enum { variant } => variant.clone(),
                _ => "?".to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");

        let reason = e.inner().to_string();
        if field.is_empty() {
            if let Some(missing) = missing_field_name(&reason) {
                return FieldError::missing(missing);
            }
        }

        FieldError::new(field, reason)
    }

    /// First failing field in `order`, falling back to any failing field.
    pub fn from_validation(errors: &ValidationErrors, order: &[&str]) -> FieldError {
        let field_errors = errors.field_errors();

        let first = order
            .iter()
            .find_map(|field| field_errors.get(*field).map(|errs| (field.to_string(), *errs)))
            .or_else(|| {
                field_errors
                    .iter()
                    .next()
                    .map(|(field, errs)| (field.to_string(), *errs))
            });

        match first.and_then(|(field, errs)| errs.first().map(|e| (field, e))) {
            Some((field, e)) => {
                let reason = e
                    .message
                    .as_ref()
                    .map(|it| it.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field, reason)
            }
            None => FieldError::new("data", "Input failed validation."),
        }
    }
}

fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl From<FieldError> for Problem {
    fn from(e: FieldError) -> Self {
        problems::validation(e.field, e.reason)
    }
}

fn whole_number(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        let f = n.as_f64()?;
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    })
}

/// Integer that also accepts floats without a fractional part; `null` is `None`.
pub fn optional_whole<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => whole_number(&n)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("Input should be a valid integer.")),
        Some(_) => Err(serde::de::Error::custom("Input should be a valid integer.")),
    }
}
