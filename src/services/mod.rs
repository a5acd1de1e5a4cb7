//! Business logic services

pub mod authors;
pub mod books;

use std::sync::Arc;

use validator::ValidationErrors;

use crate::{error::AppError, repository::LibraryStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    store: Arc<dyn LibraryStore>,
}

impl Services {
    /// Create all services over the given store handle
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self {
            authors: authors::AuthorsService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            store,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> crate::AppResult<()> {
        self.store.ping().await
    }
}

/// Flatten validator output into a single user-facing message
pub(crate) fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .collect();
    messages.sort();
    AppError::Validation(messages.join("; "))
}
