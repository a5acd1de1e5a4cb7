//! Author form and delete endpoints

use axum::{
    extract::State,
    response::{Html, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::{extract::RecordId, flash, flash::Flash, form_error, redirect_with_flash};
use crate::{
    error::{AppError, AppResult},
    models::AuthorForm,
    views, AppState,
};

/// Show the empty author form
pub async fn add_author_form(jar: CookieJar) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, flash) = flash::take(jar);
    let page = views::author_form(
        "Add author",
        "/add_author",
        &AuthorForm::default(),
        flash.as_ref(),
        None,
    )?;
    Ok((jar, Html(page)))
}

/// Create an author
pub async fn add_author(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(&form).await {
        Ok(author) => Ok(redirect_with_flash(
            jar,
            "/library",
            Flash::success(format!("Author \"{}\" added", author.name)),
        )),
        Err(err) => form_error(err, jar, |msg| {
            views::author_form("Add author", "/add_author", &form, None, Some(msg))
        }),
    }
}

/// Show the edit form for an existing author
pub async fn edit_author_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let author = state.services.authors.get_by_id(id).await?;
    let (jar, flash) = flash::take(jar);
    let page = views::author_form(
        &format!("Edit author: {}", author.name),
        &format!("/edit_author/{}", author.id),
        &AuthorForm::from(&author),
        flash.as_ref(),
        None,
    )?;
    Ok((jar, Html(page)))
}

/// Replace an author's fields
pub async fn edit_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    jar: CookieJar,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let current = state.services.authors.get_by_id(id).await?;

    match state.services.authors.update(id, &form).await {
        Ok(author) => Ok(redirect_with_flash(
            jar,
            "/edit",
            Flash::success(format!("Author \"{}\" updated", author.name)),
        )),
        Err(err) => form_error(err, jar, |msg| {
            views::author_form(
                &format!("Edit author: {}", current.name),
                &format!("/edit_author/{}", current.id),
                &form,
                None,
                Some(msg),
            )
        }),
    }
}

/// Delete an author that no longer has books
pub async fn delete_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    jar: CookieJar,
) -> AppResult<Response> {
    match state.services.authors.delete(id).await {
        Ok(author) => Ok(redirect_with_flash(
            jar,
            "/edit",
            Flash::success(format!("Author \"{}\" deleted", author.name)),
        )),
        Err(AppError::BusinessRule(msg)) => Ok(redirect_with_flash(jar, "/edit", Flash::error(msg))),
        Err(err) => Err(err),
    }
}
