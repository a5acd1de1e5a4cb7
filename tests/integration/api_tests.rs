//! End-to-end tests against a real PostgreSQL database.
//!
//! Each test gets a fresh database from `#[sqlx::test]` with the migrations
//! applied. Requests go straight into the router without a TCP listener.
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use library_catalog::{
    api::create_router,
    models::BookStatus,
    repository::{LibraryStore, Repository},
    AppState,
};

fn build_app(pool: PgPool) -> Router {
    create_router(AppState::new(Arc::new(Repository::new(pool))))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*)::bigint FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed_author(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO author (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
#[ignore]
async fn test_duplicate_author_is_rejected(pool: PgPool) {
    let response = post_form(build_app(pool.clone()), "/add_author", "name=Stanis%C5%82aw+Lem").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = post_form(build_app(pool.clone()), "/add_author", "name=Stanis%C5%82aw+Lem").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(count(&pool, "author").await, 1);
}

#[sqlx::test]
#[ignore]
async fn test_created_book_appears_in_library(pool: PgPool) {
    let author_id = seed_author(&pool, "Octavia Butler").await;

    let response = post_form(
        build_app(pool.clone()),
        "/add_book",
        &format!("title=Kindred&author_id={}&year=1979&status=available", author_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(count(&pool, "book").await, 1);

    let body = body_text(get(build_app(pool), "/library").await).await;
    assert_eq!(body.matches("Kindred").count(), 1);
    assert!(body.contains("Octavia Butler"));
}

#[sqlx::test]
#[ignore]
async fn test_empty_title_creates_no_book(pool: PgPool) {
    let author_id = seed_author(&pool, "Octavia Butler").await;

    let response = post_form(
        build_app(pool.clone()),
        "/add_book",
        &format!("title=&author_id={}&year=1979&status=available", author_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<form"));
    assert_eq!(count(&pool, "book").await, 0);
}

#[sqlx::test]
#[ignore]
async fn test_deleted_book_leaves_library(pool: PgPool) {
    let author_id = seed_author(&pool, "Octavia Butler").await;
    let book_id: i32 = sqlx::query_scalar(
        "INSERT INTO book (title, author_id, year) VALUES ('Kindred', $1, 1979) RETURNING id",
    )
    .bind(author_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let response = post_form(build_app(pool.clone()), &format!("/delete_book/{}", book_id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_text(get(build_app(pool.clone()), "/library").await).await;
    assert!(!body.contains("Kindred"));

    let response = post_form(build_app(pool), &format!("/delete_book/{}", book_id), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore]
async fn test_status_edit_is_visible_immediately(pool: PgPool) {
    let author_id = seed_author(&pool, "Octavia Butler").await;
    let repository = Repository::new(pool.clone());
    let book_id: i32 = sqlx::query_scalar(
        "INSERT INTO book (title, author_id, year) VALUES ('Kindred', $1, 1979) RETURNING id",
    )
    .bind(author_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(
        repository.get_book(book_id).await.unwrap().status,
        BookStatus::Available
    );

    let response = post_form(
        build_app(pool.clone()),
        &format!("/edit_book/{}", book_id),
        &format!("title=Kindred&author_id={}&year=1979&status=borrowed", author_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        repository.get_book(book_id).await.unwrap().status,
        BookStatus::Borrowed
    );
}

#[sqlx::test]
#[ignore]
async fn test_unknown_author_page_returns_404(pool: PgPool) {
    let response = get(build_app(pool), "/author/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore]
async fn test_author_with_books_cannot_be_deleted(pool: PgPool) {
    let author_id = seed_author(&pool, "Octavia Butler").await;
    sqlx::query("INSERT INTO book (title, author_id, year) VALUES ('Kindred', $1, 1979)")
        .bind(author_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = post_form(build_app(pool.clone()), &format!("/delete_author/{}", author_id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(count(&pool, "author").await, 1);
}

#[sqlx::test]
#[ignore]
async fn test_readiness_with_database(pool: PgPool) {
    let response = get(build_app(pool), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}
