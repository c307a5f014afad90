//! Route table
//!
//! | Method | Path              | Operation |
//! |--------|-------------------|-----------|
//! | GET    | `/api/books`      | list      |
//! | POST   | `/api/books`      | create    |
//! | GET    | `/api/books/`     | list      |
//! | POST   | `/api/books/`     | create    |
//! | GET    | `/api/books/{id}` | get       |
//! | PUT    | `/api/books/{id}` | update    |
//! | DELETE | `/api/books/{id}` | delete    |
//! | GET    | `/health`         | liveness  |
//! | GET    | `/ready`          | readiness |

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::{
    handlers::{ApiError, BookHandler, CollectionHandler, ItemResponse, ListResponse, MessageResponse},
    health,
    models::Book,
    repository::Repository,
    state::AppState,
};

async fn list_books<R>(
    State(books): State<BookHandler<R>>,
) -> Result<ListResponse<Book>, ApiError>
where
    R: Repository<Book> + 'static,
{
    books.list().await
}

async fn create_book<R>(
    State(books): State<BookHandler<R>>,
    Json(payload): Json<Value>,
) -> Result<ItemResponse<Book>, ApiError>
where
    R: Repository<Book> + 'static,
{
    books.create(payload).await
}

async fn get_book<R>(
    State(books): State<BookHandler<R>>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Book>, ApiError>
where
    R: Repository<Book> + 'static,
{
    books.get(id).await
}

async fn update_book<R>(
    State(books): State<BookHandler<R>>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<ItemResponse<Book>, ApiError>
where
    R: Repository<Book> + 'static,
{
    books.update(id, payload).await
}

async fn delete_book<R>(
    State(books): State<BookHandler<R>>,
    Path(id): Path<String>,
) -> Result<MessageResponse, ApiError>
where
    R: Repository<Book> + 'static,
{
    books.delete(id).await
}

/// `/api/books` routes
pub fn book_routes<R>() -> Router<AppState<R>>
where
    R: Repository<Book> + 'static,
{
    Router::new()
        .route("/api/books", get(list_books::<R>).post(create_book::<R>))
        .route("/api/books/", get(list_books::<R>).post(create_book::<R>))
        .route(
            "/api/books/{id}",
            get(get_book::<R>)
                .put(update_book::<R>)
                .delete(delete_book::<R>),
        )
}

/// `/health` and `/ready` probes
pub fn health_routes<R>() -> Router<AppState<R>>
where
    R: Repository<Book> + 'static,
{
    Router::new()
        .route("/health", get(health::health::<R>))
        .route("/ready", get(health::readiness::<R>))
}

/// Complete application router with state applied
///
/// Middleware is added by [`Server`](crate::server::Server); the bare router
/// is what the integration tests drive.
pub fn app<R>(state: AppState<R>) -> Router
where
    R: Repository<Book> + 'static,
{
    Router::new()
        .merge(book_routes::<R>())
        .merge(health_routes::<R>())
        .with_state(state)
}
