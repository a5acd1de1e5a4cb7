//! Library Catalog
//!
//! A small server for managing a library's authors and books through
//! server-rendered HTML forms, backed by PostgreSQL.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state over any store implementation
    pub fn new(store: Arc<dyn repository::LibraryStore>) -> Self {
        Self {
            services: Arc::new(services::Services::new(store)),
        }
    }
}
