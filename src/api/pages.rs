//! Listing pages

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use super::{extract::RecordId, flash};
use crate::{error::AppResult, views, AppState};

/// Static landing page
pub async fn index(jar: CookieJar) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(views::index(flash.as_ref())?)))
}

/// List all books
pub async fn library(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let books = state.services.books.list().await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(views::library(flash.as_ref(), &books)?)))
}

/// List the books of one author
pub async fn author_books(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (author, books) = state.services.authors.get_with_books(id).await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(views::author_books(flash.as_ref(), &author, &books)?)))
}

/// List all books and authors with edit and delete controls
pub async fn edit(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let books = state.services.books.list().await?;
    let authors = state.services.authors.list_with_counts().await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(views::edit(flash.as_ref(), &books, &authors)?)))
}
