//! Book model and lending status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use validator::Validate;

/// Lending status of a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Available,
    Borrowed,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::Borrowed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        }
    }

    /// Human readable label for listings and selects
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

// SQLx conversion for BookStatus (stored as VARCHAR with a CHECK constraint)
impl sqlx::Type<Postgres> for BookStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BookStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub year: i32,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book joined with its author's name, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub author_name: String,
    pub year: i32,
    pub status: BookStatus,
}

/// Raw book form submission. Every field is kept as text so that a missing or
/// malformed value re-renders the form instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub status: String,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author_id: book.author_id.to_string(),
            year: book.year.to_string(),
            status: book.status.as_str().to_string(),
        }
    }
}

/// Validated book fields, used for both create and full update
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewBook {
    #[validate(length(max = 120, message = "Title must be at most 120 characters"))]
    pub title: String,
    pub author_id: i32,
    pub year: i32,
    pub status: BookStatus,
}
