//! Server-rendered HTML pages
//!
//! Templates live in `templates/` and are compiled into the binary. They are
//! registered once in a strict-mode handlebars registry; every page is
//! rendered from a serialized context, with handlebars escaping all text.

use axum::http::StatusCode;
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::{
    api::flash::Flash,
    error::{AppError, AppResult},
    models::{Author, AuthorForm, AuthorSummary, BookDetails, BookForm, BookStatus},
};

const TEMPLATES: [(&str, &str); 7] = [
    ("layout", include_str!("../templates/layout.hbs")),
    ("index", include_str!("../templates/index.hbs")),
    ("books", include_str!("../templates/books.hbs")),
    ("author_form", include_str!("../templates/author_form.hbs")),
    ("book_form", include_str!("../templates/book_form.hbs")),
    ("edit", include_str!("../templates/edit.hbs")),
    ("error", include_str!("../templates/error.hbs")),
];

static REGISTRY: Lazy<Handlebars<'static>> = Lazy::new(build_registry);

fn build_registry() -> Handlebars<'static> {
    let mut r = Handlebars::new();
    r.set_strict_mode(true);
    for (name, source) in TEMPLATES {
        if let Err(e) = r.register_template_string(name, source) {
            tracing::error!("Invalid template {}: {}", name, e);
        }
    }
    r
}

/// Common page frame: every template renders inside the `layout` partial
#[derive(Serialize)]
struct Page<'a, T: Serialize> {
    title: String,
    flash: Option<&'a Flash>,
    #[serde(flatten)]
    body: T,
}

fn render<T: Serialize>(name: &str, title: String, flash: Option<&Flash>, body: T) -> AppResult<String> {
    REGISTRY
        .render(name, &Page { title, flash, body })
        .map_err(|e| AppError::Internal(format!("Failed to render {}: {}", name, e)))
}

#[derive(Serialize)]
struct BookRow<'a> {
    id: i32,
    title: &'a str,
    author_id: i32,
    author_name: &'a str,
    year: i32,
    status: &'static str,
}

impl<'a> From<&'a BookDetails> for BookRow<'a> {
    fn from(book: &'a BookDetails) -> Self {
        Self {
            id: book.id,
            title: &book.title,
            author_id: book.author_id,
            author_name: &book.author_name,
            year: book.year,
            status: book.status.label(),
        }
    }
}

#[derive(Serialize)]
struct BooksBody<'a> {
    with_author: bool,
    books: Vec<BookRow<'a>>,
}

/// Landing page
pub fn index(flash: Option<&Flash>) -> AppResult<String> {
    render("index", "Library catalog".to_string(), flash, serde_json::json!({}))
}

/// All books
pub fn library(flash: Option<&Flash>, books: &[BookDetails]) -> AppResult<String> {
    let body = BooksBody {
        with_author: true,
        books: books.iter().map(BookRow::from).collect(),
    };
    render("books", "Library".to_string(), flash, body)
}

/// Books written by one author
pub fn author_books(
    flash: Option<&Flash>,
    author: &Author,
    books: &[BookDetails],
) -> AppResult<String> {
    let body = BooksBody {
        with_author: false,
        books: books.iter().map(BookRow::from).collect(),
    };
    render("books", format!("Books by {}", author.name), flash, body)
}

#[derive(Serialize)]
struct AuthorFormBody<'a> {
    action: &'a str,
    name: &'a str,
    error: Option<&'a str>,
}

/// Create or edit an author
pub fn author_form(
    heading: &str,
    action: &str,
    form: &AuthorForm,
    flash: Option<&Flash>,
    error: Option<&str>,
) -> AppResult<String> {
    let body = AuthorFormBody {
        action,
        name: &form.name,
        error,
    };
    render("author_form", heading.to_string(), flash, body)
}

#[derive(Serialize)]
struct AuthorOption<'a> {
    id: i32,
    name: &'a str,
    selected: bool,
}

#[derive(Serialize)]
struct StatusOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct BookFormBody<'a> {
    action: &'a str,
    book_title: &'a str,
    year: &'a str,
    authors: Vec<AuthorOption<'a>>,
    statuses: Vec<StatusOption>,
    error: Option<&'a str>,
}

/// Create or edit a book
pub fn book_form(
    heading: &str,
    action: &str,
    form: &BookForm,
    authors: &[Author],
    flash: Option<&Flash>,
    error: Option<&str>,
) -> AppResult<String> {
    let chosen_author = form.author_id.trim().parse::<i32>().ok();
    let current_status = form.status.parse::<BookStatus>().unwrap_or_default();

    let body = BookFormBody {
        action,
        book_title: &form.title,
        year: &form.year,
        authors: authors
            .iter()
            .map(|a| AuthorOption {
                id: a.id,
                name: &a.name,
                selected: chosen_author == Some(a.id),
            })
            .collect(),
        statuses: BookStatus::ALL
            .iter()
            .map(|s| StatusOption {
                value: s.as_str(),
                label: s.label(),
                selected: *s == current_status,
            })
            .collect(),
        error,
    };
    render("book_form", heading.to_string(), flash, body)
}

#[derive(Serialize)]
struct EditBody<'a> {
    books: Vec<BookRow<'a>>,
    authors: &'a [AuthorSummary],
}

/// Everything editable, with delete buttons
pub fn edit(
    flash: Option<&Flash>,
    books: &[BookDetails],
    authors: &[AuthorSummary],
) -> AppResult<String> {
    let body = EditBody {
        books: books.iter().map(BookRow::from).collect(),
        authors,
    };
    render("edit", "Edit catalog".to_string(), flash, body)
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

/// Error page for failed requests. Falls back to plain markup if the
/// template itself cannot render.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    render("error", title.clone(), None, ErrorBody { message }).unwrap_or_else(|e| {
        tracing::error!("{}", e);
        format!(
            "<h1>{}</h1><p>{}</p>",
            handlebars::html_escape(&title),
            handlebars::html_escape(message)
        )
    })
}
