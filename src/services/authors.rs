//! Author service

use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorData, Book},
    repository::{BookFilter, Repository},
};

/// An author with the books referencing it
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.repository
            .authors
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    /// Author and their books, fetched concurrently
    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        let filter = BookFilter::by_author(id);
        let (author, books) = tokio::try_join!(
            self.repository.authors.get(id),
            self.repository.books.list(&filter),
        )?;
        Ok(author.map(|author| AuthorDetail { author, books }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    pub async fn create(&self, data: &AuthorData) -> AppResult<Author> {
        let author = self.repository.authors.create(data).await?;
        tracing::info!("Created author id={}", author.id);
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, data: &AuthorData) -> AppResult<Author> {
        let author = self
            .repository
            .authors
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Updated author id={}", id);
        Ok(author)
    }

    /// Delete an author unless books still reference it
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorDetail>> {
        let Some(detail) = self.find_detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.books.is_empty() {
            tracing::info!(
                "Refusing to delete author id={}: {} book(s) reference it",
                id,
                detail.books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }
        if self.repository.authors.delete(id).await? {
            tracing::info!("Deleted author id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockAuthorStore, MockBookInstanceStore, MockBookStore, MockGenreStore};
    use crate::models::Reference;
    use std::sync::Arc;

    fn author(id: Uuid) -> Author {
        Author {
            id,
            first_name: "Jim".to_string(),
            family_name: "Butcher".to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    fn repository(authors: MockAuthorStore, books: MockBookStore) -> Repository {
        Repository::from_stores(
            Arc::new(authors),
            Arc::new(MockGenreStore::new()),
            Arc::new(books),
            Arc::new(MockBookInstanceStore::new()),
        )
    }

    #[tokio::test]
    async fn test_delete_blocked_by_books_never_deletes() {
        let id = Uuid::new_v4();
        let mut authors = MockAuthorStore::new();
        authors.expect_get().returning(move |id| Ok(Some(author(id))));
        authors.expect_delete().never();

        let mut books = MockBookStore::new();
        books.expect_list().returning(move |filter| {
            assert_eq!(filter.author, Some(id));
            Ok(vec![Book {
                id: Uuid::new_v4(),
                title: "Storm Front".to_string(),
                author: Reference::Id(id),
                summary: "Harry Dresden's first case file".to_string(),
                isbn: "9780451457813".to_string(),
                genre: vec![],
            }])
        });

        let service = AuthorsService::new(repository(authors, books));
        match service.delete(id).await.unwrap() {
            DeleteOutcome::Blocked(detail) => assert_eq!(detail.books.len(), 1),
            other => panic!("expected blocked delete, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detail_fails_when_dependent_query_fails() {
        let mut authors = MockAuthorStore::new();
        authors.expect_get().returning(|id| Ok(Some(author(id))));
        let mut books = MockBookStore::new();
        books
            .expect_list()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = AuthorsService::new(repository(authors, books));
        let result = service.detail(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_missing_author_is_not_found() {
        let mut authors = MockAuthorStore::new();
        authors.expect_update().returning(|_, _| Ok(None));

        let service = AuthorsService::new(repository(authors, MockBookStore::new()));
        let data = AuthorData {
            first_name: "Jim".to_string(),
            family_name: "Butcher".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        let result = service.update(Uuid::new_v4(), &data).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
