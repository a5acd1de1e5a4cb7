//! HTTP handlers for the catalog pages

pub mod authors;
pub mod books;
pub mod extract;
pub mod flash;
pub mod health;
pub mod pages;


use axum::{
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::trace::TraceLayer;

use crate::{error::AppError, AppResult, AppState};
use flash::Flash;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Listings
        .route("/", get(pages::index))
        .route("/library", get(pages::library))
        .route("/author/:id", get(pages::author_books))
        .route("/edit", get(pages::edit))
        // Authors
        .route(
            "/add_author",
            get(authors::add_author_form).post(authors::add_author),
        )
        .route(
            "/edit_author/:id",
            get(authors::edit_author_form).post(authors::edit_author),
        )
        .route("/delete_author/:id", post(authors::delete_author))
        // Books
        .route("/add_book", get(books::add_book_form).post(books::add_book))
        .route(
            "/edit_book/:id",
            get(books::edit_book_form).post(books::edit_book),
        )
        .route("/delete_book/:id", post(books::delete_book))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No page at {}", uri.path()))
}

/// Redirect (303) to `to`, carrying a flash for the next page
pub(crate) fn redirect_with_flash(jar: CookieJar, to: &str, flash: Flash) -> Response {
    (flash::set(jar, flash), Redirect::to(to)).into_response()
}

/// Re-render a submitted form when the error is one the user can correct;
/// anything else fails the request.
pub(crate) fn form_error(
    err: AppError,
    jar: CookieJar,
    render: impl FnOnce(&str) -> AppResult<String>,
) -> AppResult<Response> {
    match err.form_status() {
        Some(status) => {
            let page = render(&err.user_message())?;
            Ok((status, jar, Html(page)).into_response())
        }
        None => Err(err),
    }
}
