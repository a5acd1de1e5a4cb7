//! Authors repository

use sqlx::{Pool, Postgres};

use super::map_constraint_error;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorSummary, NewAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors in insertion order
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT * FROM author ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List all authors with the number of books referencing each
    pub async fn list_with_counts(&self) -> AppResult<Vec<AuthorSummary>> {
        let rows = sqlx::query_as::<_, AuthorSummary>(
            r#"
            SELECT a.id, a.name, COUNT(b.id)::bigint AS book_count
            FROM author a
            LEFT JOIN book b ON b.author_id = a.id
            GROUP BY a.id, a.name
            ORDER BY a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM author WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Create an author
    pub async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("INSERT INTO author (name) VALUES ($1) RETURNING *")
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_constraint_error(
                    e,
                    || duplicate_name(&data.name),
                    || AppError::Internal("Unexpected foreign key on author insert".to_string()),
                )
            })
    }

    /// Replace the mutable fields of an author
    pub async fn update(&self, id: i32, data: &NewAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "UPDATE author SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(&data.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_error(
                e,
                || duplicate_name(&data.name),
                || AppError::Internal("Unexpected foreign key on author update".to_string()),
            )
        })?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Delete an author. Books still referencing it make the schema refuse.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM author WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_constraint_error(
                    e,
                    || AppError::Internal("Unexpected unique constraint on author delete".to_string()),
                    || {
                        AppError::BusinessRule(
                            "Cannot delete author: books still reference them".to_string(),
                        )
                    },
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }
}

fn duplicate_name(name: &str) -> AppError {
    AppError::Conflict(format!("An author named \"{}\" already exists", name))
}
