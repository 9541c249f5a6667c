//! Book instance create/update form

use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use super::{escape, field_errors, parse_date, parse_id, FieldError, FormFields, Submission};
use crate::models::{BookInstance, BookInstanceData, BookInstanceStatus};

const FIELDS: &[&str] = &["book", "imprint", "status", "due_back"];

#[derive(Debug, Clone, Serialize, Validate)]
pub struct BookInstanceForm {
    #[validate(length(min = 1, message = "Book must be specified."))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified."))]
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl BookInstanceForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            book: fields.value("book"),
            imprint: fields.value("imprint"),
            status: fields.value("status"),
            due_back: fields.value("due_back"),
        }
    }

    pub fn submit(self) -> Submission<Self, BookInstanceData> {
        let mut errors = field_errors(self.validate(), FIELDS);
        let book = parse_id(&self.book, "book", "Unknown book.", &mut errors);
        let status = if self.status.is_empty() {
            Some(BookInstanceStatus::default())
        } else {
            match self.status.parse::<BookInstanceStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.push(FieldError::new("status", "Invalid status."));
                    None
                }
            }
        };
        let due_back = parse_date(&self.due_back, "due_back", "Invalid date.", &mut errors);

        let form = Self {
            book: escape(&self.book),
            imprint: escape(&self.imprint),
            status: status.map(|s| s.to_string()).unwrap_or_default(),
            due_back: due_back.map(|d| d.to_string()).unwrap_or_default(),
        };
        let data = match (book, status) {
            (Some(book), Some(status)) => Some(BookInstanceData {
                book,
                imprint: form.imprint.clone(),
                status,
                due_back: due_back.unwrap_or_else(|| Utc::now().date_naive()),
            }),
            _ => None,
        };
        Submission::new(form, errors, || data)
    }
}

/// A blank form preselects the default status
impl Default for BookInstanceForm {
    fn default() -> Self {
        Self {
            book: String::new(),
            imprint: String::new(),
            status: BookInstanceStatus::default().to_string(),
            due_back: String::new(),
        }
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.id().to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance.due_back_yyyy_mm_dd(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn form(status: &str, due_back: &str) -> BookInstanceForm {
        BookInstanceForm {
            book: Uuid::new_v4().to_string(),
            imprint: "Gollancz, 2011".to_string(),
            status: status.to_string(),
            due_back: due_back.to_string(),
        }
    }

    #[test]
    fn test_defaults_for_status_and_due_back() {
        let data = form("", "").submit().outcome.unwrap();
        assert_eq!(data.status, BookInstanceStatus::Maintenance);
        assert_eq!(data.due_back, Utc::now().date_naive());
    }

    #[test]
    fn test_unknown_status() {
        let errors = form("Lost", "2024-01-01").submit().outcome.unwrap_err();
        assert_eq!(errors, vec![FieldError::new("status", "Invalid status.")]);
    }

    #[test]
    fn test_missing_imprint() {
        let mut f = form("Loaned", "2024-01-01");
        f.imprint = String::new();
        let errors = f.submit().outcome.unwrap_err();
        assert_eq!(errors[0].field, "imprint");
    }
}
