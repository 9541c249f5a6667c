//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use super::{BookFilter, BookStore};
use crate::{
    error::AppResult,
    models::{Book, BookData, Reference},
};

/// Row shape of the `books` table
#[derive(Debug, FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author_id: Uuid,
    summary: String,
    isbn: String,
    genre_ids: Vec<Uuid>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: Reference::Id(row.author_id),
            summary: row.summary,
            isbn: row.isbn,
            genre: row.genre_ids.into_iter().map(Reference::Id).collect(),
        }
    }
}

const FILTER_CLAUSE: &str =
    "($1::uuid IS NULL OR author_id = $1) AND ($2::uuid IS NULL OR $2 = ANY(genre_ids))";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let query = format!("SELECT * FROM books WHERE {} ORDER BY title", FILTER_CLAUSE);
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(filter.author)
            .bind(filter.genre)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(&self, data: &BookData) -> AppResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(&data.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, genre_ids = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(&data.genre)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Book::from))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: &BookFilter) -> AppResult<i64> {
        let query = format!("SELECT COUNT(*) FROM books WHERE {}", FILTER_CLAUSE);
        let count: i64 = sqlx::query_scalar(&query)
            .bind(filter.author)
            .bind(filter.genre)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
