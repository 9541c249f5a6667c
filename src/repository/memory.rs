//! In-process catalog store
//!
//! Keeps every collection in insertion order behind a single lock. Used when the
//! database URL is `memory://` and by the test suites.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuthorStore, BookFilter, BookInstanceFilter, BookInstanceStore, BookStore, GenreStore};
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, Genre, GenreData,
    },
};

#[derive(Debug, Default)]
struct Catalog {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
    book_instances: IndexMap<Uuid, BookInstance>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    catalog: Arc<RwLock<Catalog>>,
}

fn pick<T: Clone>(map: &IndexMap<Uuid, T>, ids: &[Uuid]) -> Vec<T> {
    map.iter()
        .filter(|(id, _)| ids.contains(id))
        .map(|(_, entity)| entity.clone())
        .collect()
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let catalog = self.catalog.read().await;
        let mut authors: Vec<Author> = catalog.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            (&a.family_name, &a.first_name).cmp(&(&b.family_name, &b.first_name))
        });
        Ok(authors)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.catalog.read().await.authors.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        Ok(pick(&self.catalog.read().await.authors, ids))
    }

    async fn create(&self, data: &AuthorData) -> AppResult<Author> {
        let author = Author::from_data(Uuid::new_v4(), data);
        self.catalog
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn update(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.authors.get_mut(&id).map(|slot| {
            *slot = Author::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.catalog.write().await.authors.shift_remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.catalog.read().await.authors.len() as i64)
    }
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Genre>> {
        let catalog = self.catalog.read().await;
        let mut genres: Vec<Genre> = catalog.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.catalog.read().await.genres.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        Ok(pick(&self.catalog.read().await.genres, ids))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let name = name.to_lowercase();
        Ok(self
            .catalog
            .read()
            .await
            .genres
            .values()
            .find(|genre| genre.name.to_lowercase() == name)
            .cloned())
    }

    async fn create(&self, data: &GenreData) -> AppResult<Genre> {
        let genre = Genre::from_data(Uuid::new_v4(), data);
        self.catalog
            .write()
            .await
            .genres
            .insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.genres.get_mut(&id).map(|slot| {
            *slot = Genre::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.catalog.write().await.genres.shift_remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.catalog.read().await.genres.len() as i64)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let catalog = self.catalog.read().await;
        let mut books: Vec<Book> = catalog
            .books
            .values()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.catalog.read().await.books.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        Ok(pick(&self.catalog.read().await.books, ids))
    }

    async fn create(&self, data: &BookData) -> AppResult<Book> {
        let book = Book::from_data(Uuid::new_v4(), data);
        self.catalog
            .write()
            .await
            .books
            .insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.books.get_mut(&id).map(|slot| {
            *slot = Book::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.catalog.write().await.books.shift_remove(&id).is_some())
    }

    async fn count(&self, filter: &BookFilter) -> AppResult<i64> {
        let catalog = self.catalog.read().await;
        Ok(catalog.books.values().filter(|book| filter.matches(book)).count() as i64)
    }
}

#[async_trait]
impl BookInstanceStore for MemoryStore {
    async fn list(&self, filter: &BookInstanceFilter) -> AppResult<Vec<BookInstance>> {
        let catalog = self.catalog.read().await;
        let mut instances: Vec<BookInstance> = catalog
            .book_instances
            .values()
            .filter(|instance| filter.matches(instance))
            .cloned()
            .collect();
        instances.sort_by_key(|instance| instance.due_back);
        Ok(instances)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.catalog.read().await.book_instances.get(&id).cloned())
    }

    async fn create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = BookInstance::from_data(Uuid::new_v4(), data);
        self.catalog
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<Option<BookInstance>> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.book_instances.get_mut(&id).map(|slot| {
            *slot = BookInstance::from_data(id, data);
            slot.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self
            .catalog
            .write()
            .await
            .book_instances
            .shift_remove(&id)
            .is_some())
    }

    async fn count(&self, filter: &BookInstanceFilter) -> AppResult<i64> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .book_instances
            .values()
            .filter(|instance| filter.matches(instance))
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookInstanceStatus;
    use chrono::NaiveDate;

    fn book_data(title: &str, author: Uuid, genre: Vec<Uuid>) -> BookData {
        BookData {
            title: title.to_string(),
            author,
            summary: "Twenty characters or more of summary".to_string(),
            isbn: "9780000000000".to_string(),
            genre,
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_ids() {
        let store = MemoryStore::default();
        let data = GenreData {
            name: "Poetry".to_string(),
        };

        assert!(GenreStore::update(&store, Uuid::new_v4(), &data).await.unwrap().is_none());
        assert!(!GenreStore::delete(&store, Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_book_filters() {
        let store = MemoryStore::default();
        let author = Uuid::new_v4();
        let genre = Uuid::new_v4();
        BookStore::create(&store, &book_data("B", author, vec![genre])).await.unwrap();
        BookStore::create(&store, &book_data("A", author, vec![])).await.unwrap();
        BookStore::create(&store, &book_data("C", Uuid::new_v4(), vec![genre])).await.unwrap();

        let by_author = BookStore::list(&store, &BookFilter::by_author(author)).await.unwrap();
        let titles: Vec<&str> = by_author.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);

        assert_eq!(BookStore::count(&store, &BookFilter::by_genre(genre)).await.unwrap(), 2);
        assert_eq!(BookStore::count(&store, &BookFilter::default()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_book_instance_status_count() {
        let store = MemoryStore::default();
        let book = Uuid::new_v4();
        for status in [
            BookInstanceStatus::Available,
            BookInstanceStatus::Loaned,
            BookInstanceStatus::Available,
        ] {
            BookInstanceStore::create(
                &store,
                &BookInstanceData {
                    book,
                    imprint: "Imprint".to_string(),
                    status,
                    due_back: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                },
            )
            .await
            .unwrap();
        }

        let available = BookInstanceFilter::by_status(BookInstanceStatus::Available);
        assert_eq!(BookInstanceStore::count(&store, &available).await.unwrap(), 2);
        let by_book = BookInstanceFilter::by_book(book);
        assert_eq!(BookInstanceStore::count(&store, &by_book).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_genre_by_name_ignores_case() {
        let store = MemoryStore::default();
        let created = GenreStore::create(&store, &GenreData { name: "Science Fiction".to_string() })
            .await
            .unwrap();

        let found = store.find_by_name("science fiction").await.unwrap();
        assert_eq!(found, Some(created));
    }
}
