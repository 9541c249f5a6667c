//! Genre service

use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreData},
    repository::{BookFilter, Repository},
};

/// A genre with the books listing it
#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Result of a genre create
#[derive(Debug, Clone, PartialEq)]
pub enum GenreCreated {
    Created(Genre),
    /// A genre with the same name already existed; nothing was written
    Existing(Genre),
}

impl GenreCreated {
    pub fn genre(&self) -> &Genre {
        match self {
            GenreCreated::Created(genre) | GenreCreated::Existing(genre) => genre,
        }
    }
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.repository
            .genres
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<GenreDetail>> {
        let filter = BookFilter::by_genre(id);
        let (genre, books) = tokio::try_join!(
            self.repository.genres.get(id),
            self.repository.books.list(&filter),
        )?;
        Ok(genre.map(|genre| GenreDetail { genre, books }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    /// Create a genre unless one with the same name exists. The name check is a
    /// pre-query, not a storage constraint.
    pub async fn create(&self, data: &GenreData) -> AppResult<GenreCreated> {
        if let Some(existing) = self.repository.genres.find_by_name(&data.name).await? {
            tracing::info!("Genre '{}' already exists as id={}", data.name, existing.id);
            return Ok(GenreCreated::Existing(existing));
        }
        let genre = self.repository.genres.create(data).await?;
        tracing::info!("Created genre id={}", genre.id);
        Ok(GenreCreated::Created(genre))
    }

    pub async fn update(&self, id: Uuid, data: &GenreData) -> AppResult<Genre> {
        let genre = self
            .repository
            .genres
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Updated genre id={}", id);
        Ok(genre)
    }

    /// Delete a genre unless books still list it
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreDetail>> {
        let Some(detail) = self.find_detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.books.is_empty() {
            tracing::info!(
                "Refusing to delete genre id={}: {} book(s) list it",
                id,
                detail.books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }
        if self.repository.genres.delete(id).await? {
            tracing::info!("Deleted genre id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
