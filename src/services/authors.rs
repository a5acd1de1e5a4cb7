//! Author management service

use std::sync::Arc;

use validator::Validate;

use super::validation_error;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, AuthorSummary, BookDetails, NewAuthor},
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn LibraryStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.list_authors().await
    }

    /// Authors with their book counts, for the edit listing
    pub async fn list_with_counts(&self) -> AppResult<Vec<AuthorSummary>> {
        self.store.list_authors_with_counts().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.store.get_author(id).await
    }

    /// Get an author together with every book they wrote
    pub async fn get_with_books(&self, id: i32) -> AppResult<(Author, Vec<BookDetails>)> {
        let author = self.store.get_author(id).await?;
        let books = self.store.list_books_by_author(author.id).await?;
        Ok((author, books))
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Author> {
        let data = Self::validate(form)?;
        let author = self.store.create_author(&data).await?;
        tracing::info!("Author created: id={} name={:?}", author.id, author.name);
        Ok(author)
    }

    pub async fn update(&self, id: i32, form: &AuthorForm) -> AppResult<Author> {
        let data = Self::validate(form)?;
        let author = self.store.update_author(id, &data).await?;
        tracing::info!("Author updated: id={} name={:?}", author.id, author.name);
        Ok(author)
    }

    /// Delete an author (fails while books still reference it)
    pub async fn delete(&self, id: i32) -> AppResult<Author> {
        let author = self.store.get_author(id).await?;

        let book_count = self.store.count_books_by_author(id).await?;
        if book_count > 0 {
            return Err(AppError::BusinessRule(format!(
                "Cannot delete author \"{}\": {} book(s) still linked",
                author.name, book_count
            )));
        }

        self.store.delete_author(id).await?;
        tracing::info!("Author deleted: id={} name={:?}", author.id, author.name);
        Ok(author)
    }

    fn validate(form: &AuthorForm) -> AppResult<NewAuthor> {
        let data = NewAuthor::from(form);
        if data.name.is_empty() {
            return Err(AppError::Validation("Author name is required".to_string()));
        }
        data.validate().map_err(validation_error)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockLibraryStore;
    use chrono::Utc;

    fn author(id: i32, name: &str) -> Author {
        let now = Utc::now();
        Author {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn form(name: &str) -> AuthorForm {
        AuthorForm {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let mut store = MockLibraryStore::new();
        store
            .expect_create_author()
            .withf(|data| data.name == "Ursula K. Le Guin")
            .times(1)
            .returning(|data| Ok(author(1, &data.name)));

        let service = AuthorsService::new(Arc::new(store));
        let created = service.create(&form("  Ursula K. Le Guin ")).await.unwrap();
        assert_eq!(created.name, "Ursula K. Le Guin");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let mut store = MockLibraryStore::new();
        store.expect_create_author().never();

        let service = AuthorsService::new(Arc::new(store));
        let err = service.create(&form("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Author name is required"));
    }

    #[tokio::test]
    async fn test_create_rejects_long_name() {
        let mut store = MockLibraryStore::new();
        store.expect_create_author().never();

        let service = AuthorsService::new(Arc::new(store));
        let err = service.create(&form(&"x".repeat(121))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_duplicate_propagates_conflict() {
        let mut store = MockLibraryStore::new();
        store
            .expect_create_author()
            .times(1)
            .returning(|_| Err(AppError::Conflict("already exists".to_string())));

        let service = AuthorsService::new(Arc::new(store));
        let err = service.create(&form("Stanisław Lem")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_trims_name() {
        let mut store = MockLibraryStore::new();
        store
            .expect_update_author()
            .withf(|id, data| *id == 3 && data.name == "Octavia E. Butler")
            .times(1)
            .returning(|id, data| Ok(author(id, &data.name)));

        let service = AuthorsService::new(Arc::new(store));
        let updated = service.update(3, &form(" Octavia E. Butler\t")).await.unwrap();
        assert_eq!(updated.name, "Octavia E. Butler");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let mut store = MockLibraryStore::new();
        store.expect_update_author().never();

        let service = AuthorsService::new(Arc::new(store));
        let err = service.update(3, &form("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Author name is required"));
    }

    #[tokio::test]
    async fn test_delete_blocked_while_books_exist() {
        let mut store = MockLibraryStore::new();
        store
            .expect_get_author()
            .returning(|id| Ok(author(id, "Stanisław Lem")));
        store.expect_count_books_by_author().returning(|_| Ok(2));
        store.expect_delete_author().never();

        let service = AuthorsService::new(Arc::new(store));
        let err = service.delete(5).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(msg) if msg.contains("2 book(s)")));
    }

    #[tokio::test]
    async fn test_delete_without_books() {
        let mut store = MockLibraryStore::new();
        store
            .expect_get_author()
            .returning(|id| Ok(author(id, "Stanisław Lem")));
        store.expect_count_books_by_author().returning(|_| Ok(0));
        store
            .expect_delete_author()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthorsService::new(Arc::new(store));
        let deleted = service.delete(5).await.unwrap();
        assert_eq!(deleted.id, 5);
    }

    #[tokio::test]
    async fn test_delete_unknown_author() {
        let mut store = MockLibraryStore::new();
        store
            .expect_get_author()
            .returning(|id| Err(AppError::NotFound(format!("Author {} not found", id))));
        store.expect_delete_author().never();

        let service = AuthorsService::new(Arc::new(store));
        assert!(matches!(
            service.delete(42).await,
            Err(AppError::NotFound(_))
        ));
    }
}
