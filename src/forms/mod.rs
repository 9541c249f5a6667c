//! Form handling for catalog submissions
//!
//! A submission goes through three steps:
//! 1. [`FormFields`] normalizes the urlencoded pairs (first value for scalar fields,
//!    a sequence for multi-valued fields);
//! 2. each form validates its fields into field-scoped [`FieldError`]s;
//! 3. the form is sanitized (trimmed, HTML-escaped, coerced) whatever the outcome,
//!    so an invalid form can be shown again with the submitted values.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

pub use author::AuthorForm;
pub use book::BookForm;
pub use book_instance::BookInstanceForm;
pub use genre::GenreForm;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationErrors;

/// Letters, digits, spaces, hyphens and apostrophes
pub(crate) static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N} '\-]*$").expect("valid name regex"));

/// Submitted urlencoded pairs, in submission order
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value of a scalar field, trimmed. Absent fields read as empty.
    pub fn value(&self, name: &str) -> String {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim().to_string())
            .unwrap_or_default()
    }

    /// Every non-empty value of a multi-valued field: absent gives an empty sequence,
    /// a single value a one-element sequence.
    pub fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// Validation message attached to one form field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Sanitized form plus either the validated data or the field errors
#[derive(Debug)]
pub struct Submission<F, D> {
    pub form: F,
    pub outcome: Result<D, Vec<FieldError>>,
}

impl<F, D> Submission<F, D> {
    fn new(form: F, errors: Vec<FieldError>, data: impl FnOnce() -> Option<D>) -> Self {
        let outcome = if errors.is_empty() {
            data().ok_or(errors)
        } else {
            Err(errors)
        };
        Self { form, outcome }
    }
}

/// Flatten validator output, ordered by the form's field order
pub(crate) fn field_errors(
    result: Result<(), ValidationErrors>,
    order: &[&str],
) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };

    let mut collected: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(|err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field));
                    FieldError::new(&field, message)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    collected.sort_by_key(|e| order.iter().position(|f| *f == e.field).unwrap_or(order.len()));
    collected
}

pub(crate) fn escape(value: &str) -> String {
    tera::escape_html(value)
}

/// Parse an optional `YYYY-MM-DD` date. Empty input is `None` without error.
pub(crate) fn parse_date(
    raw: &str,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// Parse a reference identifier. Empty input is left to the length validators.
pub(crate) fn parse_id(
    raw: &str,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Uuid> {
    if raw.is_empty() {
        return None;
    }
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_multi_value_normalization() {
        assert_eq!(fields(&[("title", "x")]).all("genre"), Vec::<String>::new());
        assert_eq!(fields(&[("genre", "5")]).all("genre"), vec!["5"]);
        assert_eq!(
            fields(&[("genre", "5"), ("title", "x"), ("genre", "7")]).all("genre"),
            vec!["5", "7"]
        );
    }

    #[test]
    fn test_scalar_value_takes_first_and_trims() {
        let f = fields(&[("name", "  Fantasy "), ("name", "Horror")]);
        assert_eq!(f.value("name"), "Fantasy");
        assert_eq!(f.value("missing"), "");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;&#x2F;b&gt;");
    }

    #[test]
    fn test_parse_date() {
        let mut errors = Vec::new();
        assert_eq!(parse_date("", "d", "bad", &mut errors), None);
        assert!(errors.is_empty());

        assert_eq!(
            parse_date("2001-02-03", "d", "bad", &mut errors),
            NaiveDate::from_ymd_opt(2001, 2, 3)
        );
        assert_eq!(parse_date("03/02/2001", "d", "bad", &mut errors), None);
        assert_eq!(errors, vec![FieldError::new("d", "bad")]);
    }
}
