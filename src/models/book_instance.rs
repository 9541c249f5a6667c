//! Book instance (physical copy) model and related types

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Book, Identified, Reference, CATALOG_PREFIX};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown book instance status: {}", s))
    }
}

/// Book instance document. `book` holds an identifier until populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Reference<Book>,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInstanceData {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn from_data(id: Uuid, data: &BookInstanceData) -> Self {
        Self {
            id,
            book: Reference::Id(data.book),
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        }
    }

    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    /// Due date as "January 1st, 2024"
    pub fn due_back_formatted(&self) -> String {
        let day = self.due_back.day();
        format!(
            "{} {}{}, {}",
            self.due_back.format("%B"),
            day,
            ordinal_suffix(day),
            self.due_back.year()
        )
    }

    pub fn due_back_yyyy_mm_dd(&self) -> String {
        self.due_back.format("%Y-%m-%d").to_string()
    }
}

impl Identified for BookInstance {
    fn id(&self) -> Uuid {
        self.id
    }
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("{}/book-instance/{}", CATALOG_PREFIX, id)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance_due(y: i32, m: u32, d: u32) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book: Reference::Id(Uuid::new_v4()),
            imprint: "London Gollancz, 2014.".to_string(),
            status: BookInstanceStatus::default(),
            due_back: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[test]
    fn test_status_round_trip_and_default() {
        assert_eq!(BookInstanceStatus::default(), BookInstanceStatus::Maintenance);
        assert_eq!("Loaned".parse::<BookInstanceStatus>(), Ok(BookInstanceStatus::Loaned));
        assert!("loaned".parse::<BookInstanceStatus>().is_err());
    }

    #[test]
    fn test_due_back_formats() {
        assert_eq!(instance_due(2024, 1, 1).due_back_formatted(), "January 1st, 2024");
        assert_eq!(instance_due(2024, 3, 22).due_back_formatted(), "March 22nd, 2024");
        assert_eq!(instance_due(2024, 5, 13).due_back_formatted(), "May 13th, 2024");
        assert_eq!(instance_due(2024, 5, 13).due_back_yyyy_mm_dd(), "2024-05-13");
    }
}
