//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

// Re-export commonly used types
pub use author::{Author, AuthorData};
pub use book::{Book, BookData};
pub use book_instance::{BookInstance, BookInstanceData, BookInstanceStatus};
pub use genre::{Genre, GenreData};

/// Mount point of the catalog routes
pub const CATALOG_PREFIX: &str = "/catalog";

/// Entities carrying a store-generated identifier
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// A reference field: the identifier of another entity, or the entity itself once
/// resolved by one of the `Repository::populate_*` calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(Uuid),
    Resolved(Box<T>),
}

impl<T: Identified + Clone> Reference<T> {
    pub fn id(&self) -> Uuid {
        match self {
            Reference::Id(id) => *id,
            Reference::Resolved(entity) => entity.id(),
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Id(_) => None,
            Reference::Resolved(entity) => Some(entity),
        }
    }

    /// Replace a bare identifier with the matching entity. Identifiers missing from
    /// `found` stay bare.
    pub fn resolve(&mut self, found: &HashMap<Uuid, T>) {
        if let Reference::Id(id) = self {
            if let Some(entity) = found.get(id) {
                *self = Reference::Resolved(Box::new(entity.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_dangling_reference() {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: "Fantasy".to_string(),
        };
        let found = HashMap::from([(genre.id, genre.clone())]);

        let mut present: Reference<Genre> = Reference::Id(genre.id);
        let missing_id = Uuid::new_v4();
        let mut missing: Reference<Genre> = Reference::Id(missing_id);

        present.resolve(&found);
        missing.resolve(&found);

        assert_eq!(present.resolved(), Some(&genre));
        assert_eq!(present.id(), genre.id);
        assert_eq!(missing, Reference::Id(missing_id));
        assert!(missing.resolved().is_none());
    }
}
