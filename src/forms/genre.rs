//! Genre create/update form

use serde::Serialize;
use validator::Validate;

use super::{escape, field_errors, FormFields, Submission};
use crate::models::{Genre, GenreData};

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct GenreForm {
    #[validate(length(min = 3, max = 100, message = "Genre name must be 3 to 100 characters."))]
    pub name: String,
}

impl GenreForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.value("name"),
        }
    }

    pub fn submit(self) -> Submission<Self, GenreData> {
        let errors = field_errors(self.validate(), &["name"]);
        let form = Self {
            name: escape(&self.name),
        };
        let data = GenreData {
            name: form.name.clone(),
        };
        Submission::new(form, errors, || Some(data))
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_bounds() {
        let short = GenreForm { name: "SF".to_string() }.submit();
        assert_eq!(short.outcome.unwrap_err()[0].field, "name");

        let long = GenreForm { name: "x".repeat(101) }.submit();
        assert!(long.outcome.is_err());

        let ok = GenreForm { name: "Poetry".to_string() }.submit();
        assert_eq!(ok.outcome.unwrap().name, "Poetry");
    }
}
