//! Book create/update form

use serde::Serialize;
use validator::Validate;

use super::{escape, field_errors, parse_id, FormFields, Submission};
use crate::models::{Book, BookData};

const FIELDS: &[&str] = &["title", "author", "summary", "isbn", "genre"];

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must be selected."))]
    pub author: String,
    #[validate(length(min = 20, message = "Summary must be at least 20 characters."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    /// Selected genre identifiers, always a sequence
    pub genre: Vec<String>,
}

impl BookForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            title: fields.value("title"),
            author: fields.value("author"),
            summary: fields.value("summary"),
            isbn: fields.value("isbn"),
            genre: fields.all("genre"),
        }
    }

    pub fn submit(self) -> Submission<Self, BookData> {
        let mut errors = field_errors(self.validate(), FIELDS);
        let author = parse_id(&self.author, "author", "Unknown author.", &mut errors);
        let genre: Vec<_> = self
            .genre
            .iter()
            .filter_map(|raw| parse_id(raw, "genre", "Unknown genre.", &mut errors))
            .collect();

        let form = Self {
            title: escape(&self.title),
            author: escape(&self.author),
            summary: escape(&self.summary),
            isbn: escape(&self.isbn),
            genre: self.genre.iter().map(|g| escape(g)).collect(),
        };
        let data = author.map(|author| BookData {
            title: form.title.clone(),
            author,
            summary: form.summary.clone(),
            isbn: form.isbn.clone(),
            genre,
        });
        Submission::new(form, errors, || data)
    }

    pub fn has_genre(&self, id: &str) -> bool {
        self.genre.iter().any(|g| g == id)
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.id().to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids().iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn form(summary: &str, genre: Vec<String>) -> BookForm {
        BookForm {
            title: "Dune".to_string(),
            author: Uuid::new_v4().to_string(),
            summary: summary.to_string(),
            isbn: "9780441013593".to_string(),
            genre,
        }
    }

    #[test]
    fn test_short_summary_is_rejected() {
        let errors = form("Too short", vec![]).submit().outcome.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "summary");
        assert_eq!(errors[0].message, "Summary must be at least 20 characters.");
    }

    #[test]
    fn test_genres_are_coerced_to_ids() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let data = form(
            "A desert planet and its spice, told at length.",
            ids.iter().map(Uuid::to_string).collect(),
        )
        .submit()
        .outcome
        .unwrap();
        assert_eq!(data.genre, ids);
    }

    #[test]
    fn test_malformed_references() {
        let mut f = form("A desert planet and its spice, told at length.", vec!["5".to_string()]);
        f.author = "nobody".to_string();
        let errors = f.submit().outcome.unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["author", "genre"]);
    }

    #[test]
    fn test_missing_author() {
        let mut f = form("A desert planet and its spice, told at length.", vec![]);
        f.author = String::new();
        let errors = f.submit().outcome.unwrap_err();
        assert_eq!(errors[0].message, "Author must be selected.");
    }
}
