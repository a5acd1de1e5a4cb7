//! Repository layer for database operations

pub mod authors;
pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorSummary, Book, BookDetails, NewAuthor, NewBook},
};

/// Storage operations the catalog needs. Services receive this as an
/// `Arc<dyn LibraryStore>` so handlers never reach for a global pool.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Round-trip to the backing store (readiness check)
    async fn ping(&self) -> AppResult<()>;

    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn list_authors_with_counts(&self) -> AppResult<Vec<AuthorSummary>>;
    async fn get_author(&self, id: i32) -> AppResult<Author>;
    async fn create_author(&self, data: &NewAuthor) -> AppResult<Author>;
    async fn update_author(&self, id: i32, data: &NewAuthor) -> AppResult<Author>;
    async fn delete_author(&self, id: i32) -> AppResult<()>;
    async fn count_books_by_author(&self, author_id: i32) -> AppResult<i64>;

    async fn list_books(&self) -> AppResult<Vec<BookDetails>>;
    async fn list_books_by_author(&self, author_id: i32) -> AppResult<Vec<BookDetails>>;
    async fn get_book(&self, id: i32) -> AppResult<Book>;
    async fn create_book(&self, data: &NewBook) -> AppResult<Book>;
    async fn update_book(&self, id: i32, data: &NewBook) -> AppResult<Book>;
    async fn delete_book(&self, id: i32) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl LibraryStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn list_authors_with_counts(&self) -> AppResult<Vec<AuthorSummary>> {
        self.authors.list_with_counts().await
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.authors.get_by_id(id).await
    }

    async fn create_author(&self, data: &NewAuthor) -> AppResult<Author> {
        self.authors.create(data).await
    }

    async fn update_author(&self, id: i32, data: &NewAuthor) -> AppResult<Author> {
        self.authors.update(id, data).await
    }

    async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.authors.delete(id).await
    }

    async fn count_books_by_author(&self, author_id: i32) -> AppResult<i64> {
        self.books.count_by_author(author_id).await
    }

    async fn list_books(&self) -> AppResult<Vec<BookDetails>> {
        self.books.list().await
    }

    async fn list_books_by_author(&self, author_id: i32) -> AppResult<Vec<BookDetails>> {
        self.books.list_by_author(author_id).await
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    async fn create_book(&self, data: &NewBook) -> AppResult<Book> {
        self.books.create(data).await
    }

    async fn update_book(&self, id: i32, data: &NewBook) -> AppResult<Book> {
        self.books.update(id, data).await
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.books.delete(id).await
    }
}

/// Translate constraint violations into domain errors; anything else stays a
/// database error.
pub(crate) fn map_constraint_error(
    err: sqlx::Error,
    on_unique: impl FnOnce() -> AppError,
    on_foreign_key: impl FnOnce() -> AppError,
) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key();
        }
    }
    AppError::Database(err)
}
