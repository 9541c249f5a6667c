//! Author model and derived display fields

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Identified, CATALOG_PREFIX};

/// Full author model from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Validated author fields used for create and update
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn from_data(id: Uuid, data: &AuthorData) -> Self {
        Self {
            id,
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        }
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }

    /// Years between birth and death, or between birth and `today` for a living author
    pub fn lifespan_at(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.date_of_birth?;
        let end = self.date_of_death.unwrap_or(today);
        Some(end.year() - birth.year())
    }

    pub fn lifespan(&self) -> Option<i32> {
        self.lifespan_at(Utc::now().date_naive())
    }

    pub fn date_of_birth_year(&self) -> Option<String> {
        self.date_of_birth.map(|d| d.format("%Y").to_string())
    }

    pub fn date_of_death_year(&self) -> Option<String> {
        self.date_of_death.map(|d| d.format("%Y").to_string())
    }
}

impl Identified for Author {
    fn id(&self) -> Uuid {
        self.id
    }
}

pub fn author_url(id: Uuid) -> String {
    format!("{}/author/{}", CATALOG_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(birth: Option<&str>, death: Option<&str>) -> Author {
        let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        Author {
            id: Uuid::new_v4(),
            first_name: "Ursula".to_string(),
            family_name: "Le Guin".to_string(),
            date_of_birth: birth.map(parse),
            date_of_death: death.map(parse),
        }
    }

    #[test]
    fn test_lifespan_with_death_date() {
        let a = author(Some("1950-01-01"), Some("2000-01-01"));
        assert_eq!(a.lifespan(), Some(50));
    }

    #[test]
    fn test_lifespan_living_author_uses_current_year() {
        let a = author(Some("1950-01-01"), None);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(a.lifespan_at(today), Some(74));
        assert_eq!(a.lifespan(), Some(Utc::now().year() - 1950));
    }

    #[test]
    fn test_lifespan_without_birth_date() {
        assert_eq!(author(None, Some("2000-01-01")).lifespan(), None);
    }

    #[test]
    fn test_name_url_and_years() {
        let a = author(Some("1929-10-21"), Some("2018-01-22"));
        assert_eq!(a.name(), "Ursula Le Guin");
        assert_eq!(a.url(), format!("/catalog/author/{}", a.id));
        assert_eq!(a.date_of_birth_year().as_deref(), Some("1929"));
        assert_eq!(a.date_of_death_year().as_deref(), Some("2018"));
    }
}
