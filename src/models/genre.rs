//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Identified, CATALOG_PREFIX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreData {
    pub name: String,
}

impl Genre {
    pub fn from_data(id: Uuid, data: &GenreData) -> Self {
        Self {
            id,
            name: data.name.clone(),
        }
    }

    pub fn url(&self) -> String {
        genre_url(self.id)
    }
}

impl Identified for Genre {
    fn id(&self) -> Uuid {
        self.id
    }
}

pub fn genre_url(id: Uuid) -> String {
    format!("{}/genre/{}", CATALOG_PREFIX, id)
}
