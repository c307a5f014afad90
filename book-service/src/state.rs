//! Application state shared across route handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config, handlers::BookHandler, models::Book, repository::Repository,
};

/// Shared state: configuration plus the injected book handler set
///
/// Cloning is cheap; the configuration and the gateway sit behind `Arc`s.
#[derive(Debug)]
pub struct AppState<R> {
    config: Arc<Config>,
    books: BookHandler<R>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            books: self.books.clone(),
        }
    }
}

impl<R> AppState<R>
where
    R: Repository<Book>,
{
    /// Build state around `repository`
    pub fn new(config: Config, repository: R) -> Self {
        Self {
            config: Arc::new(config),
            books: BookHandler::new(repository),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the book handler set
    pub fn books(&self) -> &BookHandler<R> {
        &self.books
    }
}

impl<R> FromRef<AppState<R>> for BookHandler<R> {
    fn from_ref(state: &AppState<R>) -> Self {
        state.books.clone()
    }
}
