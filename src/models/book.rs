//! Book model

use serde::Serialize;
use uuid::Uuid;

use super::{Author, Genre, Identified, Reference, CATALOG_PREFIX};

/// Book document. `author` and `genre` hold identifiers until populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Reference<Author>,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Reference<Genre>>,
}

/// Validated book fields used for create and update
#[derive(Debug, Clone, PartialEq)]
pub struct BookData {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn from_data(id: Uuid, data: &BookData) -> Self {
        Self {
            id,
            title: data.title.clone(),
            author: Reference::Id(data.author),
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            genre: data.genre.iter().copied().map(Reference::Id).collect(),
        }
    }

    pub fn url(&self) -> String {
        book_url(self.id)
    }

    pub fn genre_ids(&self) -> Vec<Uuid> {
        self.genre.iter().map(Reference::id).collect()
    }
}

impl Identified for Book {
    fn id(&self) -> Uuid {
        self.id
    }
}

pub fn book_url(id: Uuid) -> String {
    format!("{}/book/{}", CATALOG_PREFIX, id)
}

/// Stable, case-insensitive sort by title
pub fn sort_by_title(books: &mut [Book]) {
    books.sort_by_cached_key(|book| book.title.to_lowercase());
}
