//! PostgreSQL book instance store

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use super::{BookInstanceFilter, BookInstanceStore};
use crate::{
    error::{AppError, AppResult},
    models::{BookInstance, BookInstanceData, Reference},
};

/// Row shape of the `book_instances` table; status is stored as text
#[derive(Debug, FromRow)]
struct BookInstanceRow {
    id: Uuid,
    book_id: Uuid,
    imprint: String,
    status: String,
    due_back: NaiveDate,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            book: Reference::Id(row.book_id),
            imprint: row.imprint,
            status: row.status.parse().map_err(AppError::Internal)?,
            due_back: row.due_back,
        })
    }
}

const FILTER_CLAUSE: &str =
    "($1::uuid IS NULL OR book_id = $1) AND ($2::text IS NULL OR status = $2)";

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookInstanceStore for BookInstancesRepository {
    async fn list(&self, filter: &BookInstanceFilter) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "SELECT * FROM book_instances WHERE {} ORDER BY due_back, id",
            FILTER_CLAUSE
        );
        let rows = sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(filter.book)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(BookInstance::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstanceRow>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookInstance::try_from)
            .transpose()
    }

    async fn create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstanceRow>(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?
        .map(BookInstance::try_from)
        .transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: &BookInstanceFilter) -> AppResult<i64> {
        let query = format!("SELECT COUNT(*) FROM book_instances WHERE {}", FILTER_CLAUSE);
        let count: i64 = sqlx::query_scalar(&query)
            .bind(filter.book)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
