//! Explicit reference resolution
//!
//! Stores return references as bare identifiers. These calls fetch the referenced
//! documents in one query per kind and attach them in place.

use std::collections::HashMap;

use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{Book, BookInstance, Identified, Reference},
};

fn unique(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn by_id<T: Identified>(entities: Vec<T>) -> HashMap<Uuid, T> {
    entities.into_iter().map(|e| (e.id(), e)).collect()
}

impl Repository {
    /// Resolve `Book::author` on every book
    pub async fn populate_book_authors(&self, books: &mut [Book]) -> AppResult<()> {
        let ids = unique(books.iter().map(|b| b.author.id()));
        if ids.is_empty() {
            return Ok(());
        }
        let authors = by_id(self.authors.get_many(&ids).await?);
        for book in books.iter_mut() {
            book.author.resolve(&authors);
        }
        Ok(())
    }

    /// Resolve every entry of `Book::genre` on every book
    pub async fn populate_book_genres(&self, books: &mut [Book]) -> AppResult<()> {
        let ids = unique(books.iter().flat_map(|b| b.genre.iter().map(Reference::id)));
        if ids.is_empty() {
            return Ok(());
        }
        let genres = by_id(self.genres.get_many(&ids).await?);
        for genre in books.iter_mut().flat_map(|b| b.genre.iter_mut()) {
            genre.resolve(&genres);
        }
        Ok(())
    }

    /// Resolve `BookInstance::book` on every instance
    pub async fn populate_book_instance_books(
        &self,
        instances: &mut [BookInstance],
    ) -> AppResult<()> {
        let ids = unique(instances.iter().map(|i| i.book.id()));
        if ids.is_empty() {
            return Ok(());
        }
        let books = by_id(self.books.get_many(&ids).await?);
        for instance in instances.iter_mut() {
            instance.book.resolve(&books);
        }
        Ok(())
    }
}
