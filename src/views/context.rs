//! View-models handed to templates
//!
//! Derived display fields are computed here from the entity values, so templates
//! only read plain data.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Author, Book, BookInstance, BookInstanceStatus, Genre};

#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub first_name: String,
    pub family_name: String,
    pub lifespan: Option<i32>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            url: author.url(),
            name: author.name(),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            lifespan: author.lifespan(),
            date_of_birth: author.date_of_birth_year(),
            date_of_death: author.date_of_death_year(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub id: Uuid,
    pub url: String,
    pub name: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            url: genre.url(),
            name: genre.name.clone(),
        }
    }
}

/// A genre checkbox on the book form
#[derive(Debug, Clone, Serialize)]
pub struct GenreOption {
    pub id: Uuid,
    pub name: String,
    pub checked: bool,
}

impl GenreOption {
    pub fn list(genres: &[Genre], is_checked: impl Fn(&str) -> bool) -> Vec<Self> {
        genres
            .iter()
            .map(|genre| Self {
                id: genre.id,
                name: genre.name.clone(),
                checked: is_checked(&genre.id.to_string()),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    /// `None` while the author reference is unresolved
    pub author: Option<AuthorView>,
    pub genres: Vec<GenreView>,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            url: book.url(),
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            author: book.author.resolved().map(AuthorView::from),
            genres: book
                .genre
                .iter()
                .filter_map(|g| g.resolved())
                .map(GenreView::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub url: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: String,
    pub due_back_formatted: String,
    pub book: Option<BookView>,
}

impl From<&BookInstance> for BookInstanceView {
    fn from(instance: &BookInstance) -> Self {
        Self {
            id: instance.id,
            url: instance.url(),
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back_yyyy_mm_dd(),
            due_back_formatted: instance.due_back_formatted(),
            book: instance.book.resolved().map(BookView::from),
        }
    }
}

pub fn views<'a, T: 'a, V: From<&'a T>>(items: &'a [T]) -> Vec<V> {
    items.iter().map(V::from).collect()
}

pub fn status_options() -> Vec<&'static str> {
    BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect()
}
