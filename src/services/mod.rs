//! Business logic services
//!
//! Services orchestrate repository calls for the handlers. Independent reads are
//! issued together with `tokio::try_join!`: the first failure aborts the group and
//! the other in-flight reads are dropped.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod stats;

use crate::repository::Repository;

/// Result of a guarded delete
#[derive(Debug)]
pub enum DeleteOutcome<T> {
    Deleted,
    /// Dependents still reference the entity; carries what the confirmation view shows
    Blocked(T),
    /// Nothing to delete
    Missing,
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }
}
