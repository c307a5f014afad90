//! REST handlers for the book collection
//!
//! - [`CollectionHandler`]: the list / get / create / update / delete contract
//! - [`BookHandler`]: its implementation over any [`Repository`](crate::repository::Repository)
//! - [`ApiError`]: handler failures with central HTTP status mapping
//! - [`ItemResponse`], [`ListResponse`], [`MessageResponse`]: success envelopes
//!
//! Every envelope and [`ApiError`] implements `IntoResponse`, so axum route
//! functions return `Result<_, ApiError>` straight from the handler:
//!
//! ```rust,ignore
//! async fn get_book(
//!     State(books): State<BookHandler<R>>,
//!     Path(id): Path<String>,
//! ) -> Result<ItemResponse<Book>, ApiError> {
//!     books.get(id).await
//! }
//! ```

mod books;
mod error;
mod response;
mod traits;

pub use books::BookHandler;
pub use error::{ApiError, ApiErrorKind, ApiOperation, VALIDATION_MESSAGE};
pub use response::{ItemResponse, ListResponse, MessageResponse};
pub use traits::CollectionHandler;
