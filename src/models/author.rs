//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author with the number of books that reference it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthorSummary {
    pub id: i32,
    pub name: String,
    pub book_count: i64,
}

/// Raw author form submission, as posted by the browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub name: String,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
        }
    }
}

/// Validated author fields, used for both create and full update
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewAuthor {
    #[validate(length(max = 120, message = "Author name must be at most 120 characters"))]
    pub name: String,
}

impl From<&AuthorForm> for NewAuthor {
    fn from(form: &AuthorForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
        }
    }
}
