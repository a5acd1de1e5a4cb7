//! Book management service

use std::sync::Arc;

use validator::Validate;

use super::validation_error;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDetails, BookForm, BookStatus, NewBook},
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn LibraryStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<BookDetails>> {
        self.store.list_books().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.store.get_book(id).await
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let data = self.validate(form).await?;
        let book = self.store.create_book(&data).await?;
        tracing::info!(
            "Book created: id={} title={:?} author_id={}",
            book.id,
            book.title,
            book.author_id
        );
        Ok(book)
    }

    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let data = self.validate(form).await?;
        let book = self.store.update_book(id, &data).await?;
        tracing::info!(
            "Book updated: id={} title={:?} status={}",
            book.id,
            book.title,
            book.status
        );
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<Book> {
        let book = self.store.get_book(id).await?;
        self.store.delete_book(id).await?;
        tracing::info!("Book deleted: id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// Turn a raw form into validated fields. The referenced author must exist.
    async fn validate(&self, form: &BookForm) -> AppResult<NewBook> {
        let title = form.title.trim();
        let author_id = form.author_id.trim();
        let year = form.year.trim();

        let missing: Vec<&str> = [("title", title), ("author", author_id), ("year", year)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let author_id: i32 = author_id
            .parse()
            .map_err(|_| AppError::Validation("Selected author does not exist".to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| AppError::Validation("Year must be a whole number".to_string()))?;
        let status = if form.status.trim().is_empty() {
            BookStatus::default()
        } else {
            form.status.parse::<BookStatus>().map_err(AppError::Validation)?
        };

        let data = NewBook {
            title: title.to_string(),
            author_id,
            year,
            status,
        };
        data.validate().map_err(validation_error)?;

        match self.store.get_author(author_id).await {
            Ok(_) => Ok(data),
            Err(AppError::NotFound(_)) => Err(AppError::Validation(
                "Selected author does not exist".to_string(),
            )),
            Err(e) => Err(e),
        }
    }
}
