//! Data models for the catalog

pub mod author;
pub mod book;

pub use author::{Author, AuthorForm, AuthorSummary, NewAuthor};
pub use book::{Book, BookDetails, BookForm, BookStatus, NewBook};
