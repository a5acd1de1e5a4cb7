//! Books repository

use sqlx::{Pool, Postgres};

use super::map_constraint_error;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDetails, NewBook},
};

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.title, b.author_id, a.name AS author_name, b.year, b.status
    FROM book b
    JOIN author a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books with author names, in insertion order
    pub async fn list(&self) -> AppResult<Vec<BookDetails>> {
        let query = format!("{} ORDER BY b.id", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, BookDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List books written by one author
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<BookDetails>> {
        let query = format!("{} WHERE b.author_id = $1 ORDER BY b.id", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, BookDetails>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Count books referencing an author
    pub async fn count_by_author(&self, author_id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*)::bigint FROM book WHERE author_id = $1")
                .bind(author_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM book WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create a book
    pub async fn create(&self, data: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO book (title, author_id, year, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(data.year)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, || duplicate_title(&data.title), missing_author))
    }

    /// Replace the mutable fields of a book
    pub async fn update(&self, id: i32, data: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE book
            SET title = $1, author_id = $2, year = $3, status = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(data.year)
        .bind(data.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, || duplicate_title(&data.title), missing_author))?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}

fn duplicate_title(title: &str) -> AppError {
    AppError::Conflict(format!("A book titled \"{}\" already exists", title))
}

fn missing_author() -> AppError {
    AppError::Validation("Selected author does not exist".to_string())
}
