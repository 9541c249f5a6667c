//! Book service

use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    forms::FieldError,
    models::{book::sort_by_title, Author, Book, BookData, BookInstance, Genre},
    repository::{BookFilter, BookInstanceFilter, Repository},
};

/// A book with author and genres resolved, plus its copies
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub instances: Vec<BookInstance>,
}

/// Option lists for the book form
#[derive(Debug, Clone, Default)]
pub struct BookFormOptions {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every book with its author resolved, sorted by title ignoring case
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let mut books = self.repository.books.list(&BookFilter::default()).await?;
        self.repository.populate_book_authors(&mut books).await?;
        sort_by_title(&mut books);
        Ok(books)
    }

    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let filter = BookInstanceFilter::by_book(id);
        let (book, instances) = tokio::try_join!(
            self.repository.books.get(id),
            self.repository.book_instances.list(&filter),
        )?;
        let Some(book) = book else {
            return Ok(None);
        };

        let mut books = [book];
        self.repository.populate_book_authors(&mut books).await?;
        self.repository.populate_book_genres(&mut books).await?;
        let [book] = books;
        Ok(Some(BookDetail { book, instances }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    pub async fn form_options(&self) -> AppResult<BookFormOptions> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        Ok(BookFormOptions { authors, genres })
    }

    /// The stored book and the form option lists, fetched concurrently
    pub async fn edit(&self, id: Uuid) -> AppResult<(Book, BookFormOptions)> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books.get(id),
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        Ok((book, BookFormOptions { authors, genres }))
    }

    /// Field errors for references that do not name an existing author or genre
    pub async fn check_references(&self, data: &BookData) -> AppResult<Vec<FieldError>> {
        let (author, genres) = tokio::try_join!(
            self.repository.authors.get(data.author),
            self.repository.genres.get_many(&data.genre),
        )?;

        let mut errors = Vec::new();
        if author.is_none() {
            errors.push(FieldError::new("author", "Author does not exist."));
        }
        if data.genre.iter().any(|id| !genres.iter().any(|g| g.id == *id)) {
            errors.push(FieldError::new("genre", "Genre does not exist."));
        }
        Ok(errors)
    }

    pub async fn create(&self, data: &BookData) -> AppResult<Book> {
        let book = self.repository.books.create(data).await?;
        tracing::info!("Created book id={}", book.id);
        Ok(book)
    }

    pub async fn update(&self, id: Uuid, data: &BookData) -> AppResult<Book> {
        let book = self
            .repository
            .books
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    /// Delete a book unless copies of it still exist
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookDetail>> {
        let Some(detail) = self.find_detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.instances.is_empty() {
            tracing::info!(
                "Refusing to delete book id={}: {} copies reference it",
                id,
                detail.instances.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }
        if self.repository.books.delete(id).await? {
            tracing::info!("Deleted book id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
