//! Author create/update form

use serde::Serialize;
use validator::Validate;

use super::{escape, field_errors, parse_date, FieldError, FormFields, Submission, NAME_CHARS};
use crate::models::{Author, AuthorData};

const FIELDS: &[&str] = &["first_name", "family_name", "date_of_birth", "date_of_death"];

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, max = 100, message = "First name must be specified (100 characters max)."),
        regex(path = *NAME_CHARS, message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 100, message = "Family name must be specified (100 characters max)."),
        regex(path = *NAME_CHARS, message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            first_name: fields.value("first_name"),
            family_name: fields.value("family_name"),
            date_of_birth: fields.value("date_of_birth"),
            date_of_death: fields.value("date_of_death"),
        }
    }

    pub fn submit(self) -> Submission<Self, AuthorData> {
        let mut errors = field_errors(self.validate(), FIELDS);
        let date_of_birth = parse_date(
            &self.date_of_birth,
            "date_of_birth",
            "Invalid date of birth.",
            &mut errors,
        );
        let date_of_death = parse_date(
            &self.date_of_death,
            "date_of_death",
            "Invalid date of death.",
            &mut errors,
        );
        if let (Some(birth), Some(death)) = (date_of_birth, date_of_death) {
            if death < birth {
                errors.push(FieldError::new(
                    "date_of_death",
                    "Date of death is before date of birth.",
                ));
            }
        }

        let form = Self {
            first_name: escape(&self.first_name),
            family_name: escape(&self.family_name),
            date_of_birth: date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
            date_of_death: date_of_death.map(|d| d.to_string()).unwrap_or_default(),
        };
        let data = AuthorData {
            first_name: form.first_name.clone(),
            family_name: form.family_name.clone(),
            date_of_birth,
            date_of_death,
        };
        Submission::new(form, errors, || Some(data))
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
            date_of_death: author.date_of_death.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form(first: &str, family: &str, birth: &str, death: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: birth.to_string(),
            date_of_death: death.to_string(),
        }
    }

    #[test]
    fn test_valid_author() {
        let submission = form("Ursula", "Le Guin", "1929-10-21", "").submit();
        let data = submission.outcome.unwrap();
        assert_eq!(data.family_name, "Le Guin");
        assert_eq!(data.date_of_birth, NaiveDate::from_ymd_opt(1929, 10, 21));
        assert_eq!(data.date_of_death, None);
    }

    #[test]
    fn test_missing_names_are_reported_in_field_order() {
        let errors = form("", "", "", "").submit().outcome.unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["first_name", "family_name"]);
    }

    #[test]
    fn test_non_alphanumeric_name() {
        let submission = form("R2<D2>", "Droid", "", "").submit();
        let errors = submission.outcome.unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("first_name", "First name has non-alphanumeric characters.")]
        );
        assert_eq!(submission.form.first_name, "R2&lt;D2&gt;");
    }

    #[test]
    fn test_invalid_and_inverted_dates() {
        let errors = form("Jane", "Doe", "1990-13-01", "").submit().outcome.unwrap_err();
        assert_eq!(errors, vec![FieldError::new("date_of_birth", "Invalid date of birth.")]);

        let errors = form("Jane", "Doe", "2000-01-01", "1999-01-01").submit().outcome.unwrap_err();
        assert_eq!(errors[0].field, "date_of_death");
    }
}
