//! Book form and delete endpoints

use axum::{
    extract::State,
    response::{Html, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::{extract::RecordId, flash, flash::Flash, form_error, redirect_with_flash};
use crate::{
    error::AppResult,
    models::BookForm,
    views, AppState,
};

/// Show the empty book form
pub async fn add_book_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let authors = state.services.authors.list().await?;
    let (jar, flash) = flash::take(jar);
    let page = views::book_form(
        "Add book",
        "/add_book",
        &BookForm::default(),
        &authors,
        flash.as_ref(),
        None,
    )?;
    Ok((jar, Html(page)))
}

/// Create a book
pub async fn add_book(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let authors = state.services.authors.list().await?;

    match state.services.books.create(&form).await {
        Ok(book) => Ok(redirect_with_flash(
            jar,
            "/library",
            Flash::success(format!("Book \"{}\" added", book.title)),
        )),
        Err(err) => form_error(err, jar, |msg| {
            views::book_form("Add book", "/add_book", &form, &authors, None, Some(msg))
        }),
    }
}

/// Show the edit form for an existing book
pub async fn edit_book_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let book = state.services.books.get_by_id(id).await?;
    let authors = state.services.authors.list().await?;
    let (jar, flash) = flash::take(jar);
    let page = views::book_form(
        &format!("Edit book: {}", book.title),
        &format!("/edit_book/{}", book.id),
        &BookForm::from(&book),
        &authors,
        flash.as_ref(),
        None,
    )?;
    Ok((jar, Html(page)))
}

/// Replace a book's fields
pub async fn edit_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let current = state.services.books.get_by_id(id).await?;
    let authors = state.services.authors.list().await?;

    match state.services.books.update(id, &form).await {
        Ok(book) => Ok(redirect_with_flash(
            jar,
            "/edit",
            Flash::success(format!("Book \"{}\" updated", book.title)),
        )),
        Err(err) => form_error(err, jar, |msg| {
            views::book_form(
                &format!("Edit book: {}", current.title),
                &format!("/edit_book/{}", current.id),
                &form,
                &authors,
                None,
                Some(msg),
            )
        }),
    }
}

/// Delete a book
pub async fn delete_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    jar: CookieJar,
) -> AppResult<Response> {
    let book = state.services.books.delete(id).await?;
    Ok(redirect_with_flash(
        jar,
        "/edit",
        Flash::success(format!("Book \"{}\" deleted", book.title)),
    ))
}
