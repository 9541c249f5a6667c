//! Catalog statistics service

use serde::Serialize;

use crate::{
    error::AppResult,
    models::BookInstanceStatus,
    repository::{BookFilter, BookInstanceFilter, Repository},
};

/// Record counts shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Run the five counts concurrently. Any failure fails the whole set.
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let all_books = BookFilter::default();
        let all_instances = BookInstanceFilter::default();
        let available = BookInstanceFilter::by_status(BookInstanceStatus::Available);

        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.repository.books.count(&all_books),
            self.repository.book_instances.count(&all_instances),
            self.repository.book_instances.count(&available),
            self.repository.authors.count(),
            self.repository.genres.count(),
        )?;

        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }
}
