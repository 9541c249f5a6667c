//! Repository layer for catalog storage
//!
//! Each entity kind has a store trait with a PostgreSQL implementation (one file per
//! kind) and an in-process implementation in [`memory`]. A "not found" outcome is a
//! successful `None`/`false`, never an error.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;
pub mod populate;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookInstanceStatus,
        Genre, GenreData,
    },
};

/// Filter for book queries. Empty filter matches every book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub author: Option<Uuid>,
    pub genre: Option<Uuid>,
}

impl BookFilter {
    pub fn by_author(author: Uuid) -> Self {
        Self {
            author: Some(author),
            ..Default::default()
        }
    }

    pub fn by_genre(genre: Uuid) -> Self {
        Self {
            genre: Some(genre),
            ..Default::default()
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.author.map_or(true, |id| book.author.id() == id)
            && self.genre.map_or(true, |id| book.genre.iter().any(|g| g.id() == id))
    }
}

/// Filter for book instance queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInstanceFilter {
    pub book: Option<Uuid>,
    pub status: Option<BookInstanceStatus>,
}

impl BookInstanceFilter {
    pub fn by_book(book: Uuid) -> Self {
        Self {
            book: Some(book),
            ..Default::default()
        }
    }

    pub fn by_status(status: BookInstanceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn matches(&self, instance: &BookInstance) -> bool {
        self.book.map_or(true, |id| instance.book.id() == id)
            && self.status.map_or(true, |status| instance.status == status)
    }
}

/// Authors, ordered by family name then first name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Author>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn create(&self, data: &AuthorData) -> AppResult<Author>;
    async fn update(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<i64>;
}

/// Genres, ordered by name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Genre>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    /// Case-insensitive lookup by name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn create(&self, data: &GenreData) -> AppResult<Genre>;
    async fn update(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<i64>;
}

/// Books, ordered by title. References are returned unresolved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;
    async fn create(&self, data: &BookData) -> AppResult<Book>;
    async fn update(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self, filter: &BookFilter) -> AppResult<i64>;
}

/// Book instances, ordered by due date. References are returned unresolved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    async fn list(&self, filter: &BookInstanceFilter) -> AppResult<Vec<BookInstance>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn create(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<Option<BookInstance>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self, filter: &BookInstanceFilter) -> AppResult<i64>;
}

/// Main repository struct holding one store per entity kind
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorStore>,
    pub genres: Arc<dyn GenreStore>,
    pub books: Arc<dyn BookStore>,
    pub book_instances: Arc<dyn BookInstanceStore>,
    backend: &'static str,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            genres: Arc::new(genres::GenresRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            book_instances: Arc::new(book_instances::BookInstancesRepository::new(pool)),
            backend: "postgres",
        }
    }

    /// Create a repository backed by a fresh, empty in-process store
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::default();
        Self {
            authors: Arc::new(store.clone()),
            genres: Arc::new(store.clone()),
            books: Arc::new(store.clone()),
            book_instances: Arc::new(store),
            backend: "memory",
        }
    }

    /// Assemble a repository from arbitrary stores
    pub fn from_stores(
        authors: Arc<dyn AuthorStore>,
        genres: Arc<dyn GenreStore>,
        books: Arc<dyn BookStore>,
        book_instances: Arc<dyn BookInstanceStore>,
    ) -> Self {
        Self {
            authors,
            genres,
            books,
            book_instances,
            backend: "custom",
        }
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }
}
