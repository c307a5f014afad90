//! # book-service
//!
//! REST API over a single `book` collection: create, list, fetch by id,
//! update and delete, backed by a document store behind the
//! [`Repository`](repository::Repository) trait.
//!
//! ## Layers
//!
//! - **Routes** ([`routes`]): axum router binding method and path to handler operations
//! - **Handlers** ([`handlers`]): request validation and status-code mapping
//! - **Repository** ([`repository`]): the persistence gateway and an in-memory store
//! - **Models** ([`models`]): the `Book` record and its collection schema
//!
//! Around them sit layered configuration ([`config`]), JSON logging
//! ([`observability`]), liveness and readiness probes ([`health`]) and an HTTP
//! server with request tracking and graceful shutdown ([`server`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use book_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), InMemoryBookStore::new());
//!
//!     Server::new(config).serve(app(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;

pub mod prelude {
    pub use crate::config::{Config, MiddlewareConfig, ServiceConfig};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{
        ApiError, ApiErrorKind, ApiOperation, BookHandler, CollectionHandler, ItemResponse,
        ListResponse, MessageResponse,
    };
    pub use crate::health::{health, readiness};
    pub use crate::models::{Book, BookId};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        InMemoryBookStore, Repository, RepositoryError, RepositoryErrorKind, RepositoryOperation,
        RepositoryResult,
    };
    pub use crate::routes::app;
    pub use crate::server::Server;
    pub use crate::state::AppState;
}
