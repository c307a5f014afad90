//! Response envelopes for REST handlers
//!
//! A handler success is a status code plus a JSON body. Records and lists are
//! sent bare (no `data` wrapper) so clients receive the book itself.
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use book_service::handlers::{ItemResponse, MessageResponse};
//!
//! let created = ItemResponse::created("payload");
//! assert_eq!(created.status, StatusCode::CREATED);
//!
//! let deleted = MessageResponse::new("Book deleted");
//! assert_eq!(deleted.message, "Book deleted");
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Single item response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResponse<T> {
    /// Status sent with the item
    pub status: StatusCode,
    /// The item itself
    pub data: T,
}

impl<T> ItemResponse<T> {
    /// 200 OK with `data`
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 Created with `data`
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ItemResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.data)).into_response()
    }
}

/// Whole-collection response, always 200 OK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse<T> {
    /// The items, in store order
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.data)).into_response()
    }
}

/// `{"message": ...}` acknowledgement, 200 OK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_item_response_is_bare() {
        let response = ItemResponse::created(json!({ "title": "1984" })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!({ "title": "1984" }));
    }

    #[tokio::test]
    async fn test_empty_list_is_empty_array() {
        let response = ListResponse::<Value>::new(vec![]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_message_response_shape() {
        let response = MessageResponse::new("Book deleted").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "message": "Book deleted" }));
    }
}
