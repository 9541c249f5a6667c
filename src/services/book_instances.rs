//! Book instance (copy) service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::FieldError,
    models::{book::sort_by_title, Book, BookInstance, BookInstanceData},
    repository::{BookFilter, BookInstanceFilter, Repository},
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every copy with its book resolved
    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let mut instances = self
            .repository
            .book_instances
            .list(&BookInstanceFilter::default())
            .await?;
        self.repository
            .populate_book_instance_books(&mut instances)
            .await?;
        Ok(instances)
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let Some(instance) = self.repository.book_instances.get(id).await? else {
            return Ok(None);
        };
        let mut instances = [instance];
        self.repository
            .populate_book_instance_books(&mut instances)
            .await?;
        let [instance] = instances;
        Ok(Some(instance))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstance> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    /// Books offered by the copy form, sorted by title
    pub async fn book_options(&self) -> AppResult<Vec<Book>> {
        let mut books = self.repository.books.list(&BookFilter::default()).await?;
        sort_by_title(&mut books);
        Ok(books)
    }

    /// The stored copy and the book options, fetched concurrently
    pub async fn edit(&self, id: Uuid) -> AppResult<(BookInstance, Vec<Book>)> {
        let all_books = BookFilter::default();
        let (instance, mut books) = tokio::try_join!(
            self.repository.book_instances.get(id),
            self.repository.books.list(&all_books),
        )?;
        let instance =
            instance.ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        sort_by_title(&mut books);
        Ok((instance, books))
    }

    pub async fn check_references(&self, data: &BookInstanceData) -> AppResult<Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.repository.books.get(data.book).await?.is_none() {
            errors.push(FieldError::new("book", "Book does not exist."));
        }
        Ok(errors)
    }

    pub async fn create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = self.repository.book_instances.create(data).await?;
        tracing::info!("Created book copy id={} of book id={}", instance.id, data.book);
        Ok(instance)
    }

    pub async fn update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = self
            .repository
            .book_instances
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        tracing::info!("Updated book copy id={}", id);
        Ok(instance)
    }

    /// Copies have no dependents; returns whether anything was deleted
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.repository.book_instances.delete(id).await?;
        if deleted {
            tracing::info!("Deleted book copy id={}", id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookData, BookInstanceStatus, Reference};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_detail_resolves_book() {
        let repository = Repository::in_memory();
        let book = repository
            .books
            .create(&BookData {
                title: "The Fifth Season".to_string(),
                author: Uuid::new_v4(),
                summary: "A world that ends again and again".to_string(),
                isbn: "9780316229296".to_string(),
                genre: vec![],
            })
            .await
            .unwrap();

        let service = BookInstancesService::new(repository);
        let instance = service
            .create(&BookInstanceData {
                book: book.id,
                imprint: "Orbit, 2015".to_string(),
                status: BookInstanceStatus::Available,
                due_back: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            })
            .await
            .unwrap();

        let detail = service.detail(instance.id).await.unwrap();
        assert_eq!(detail.book, Reference::Resolved(Box::new(book)));

        assert!(service.delete(instance.id).await.unwrap());
        assert!(matches!(service.detail(instance.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_edit_returns_copy_with_books_by_title() {
        let repository = Repository::in_memory();
        let mut books = Vec::new();
        for title in ["Zorba", "alpha", "Beta"] {
            let book = repository
                .books
                .create(&BookData {
                    title: title.to_string(),
                    author: Uuid::new_v4(),
                    summary: "Summary text of twenty or more chars".to_string(),
                    isbn: "1".to_string(),
                    genre: vec![],
                })
                .await
                .unwrap();
            books.push(book);
        }

        let service = BookInstancesService::new(repository);
        let instance = service
            .create(&BookInstanceData {
                book: books[0].id,
                imprint: "Imprint".to_string(),
                status: BookInstanceStatus::Loaned,
                due_back: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            })
            .await
            .unwrap();

        let (found, options) = service.edit(instance.id).await.unwrap();
        assert_eq!(found.id, instance.id);
        let titles: Vec<&str> = options.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Beta", "Zorba"]);

        assert!(matches!(service.edit(Uuid::new_v4()).await, Err(AppError::NotFound(_))));
    }
}
