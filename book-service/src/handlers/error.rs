//! API error types for handler operations
//!
//! Every failure a handler can produce is an [`ApiError`]. Its
//! [`ApiErrorKind`] decides the HTTP status in one place
//! ([`ApiErrorKind::status_code`]), and gateway errors convert into it through
//! `From<RepositoryError>`: the repository operation tells us which handler
//! operation failed, and that decides whether the client gets a 400 or a 500.
//!
//! # Example
//!
//! ```rust
//! use book_service::handlers::{ApiError, ApiErrorKind, ApiOperation};
//!
//! let error = ApiError::not_found(ApiOperation::Delete, "Book", "0192f0c1-0000-7000-8000-000000000000");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.message, "Book not found");
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::repository::{RepositoryError, RepositoryOperation};

/// Canonical message for a create payload that fails pre-validation
pub const VALIDATION_MESSAGE: &str = "All fields required (title, author, publishedYear as number)";

/// Handler operation being performed when the error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing the collection
    List,
    /// Getting a single entity by ID
    Get,
    /// Creating a new entity
    Create,
    /// Updating an existing entity
    Update,
    /// Deleting an entity (hard delete)
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl From<RepositoryOperation> for ApiOperation {
    fn from(op: RepositoryOperation) -> Self {
        match op {
            RepositoryOperation::FindAll | RepositoryOperation::Ping => Self::List,
            RepositoryOperation::FindById => Self::Get,
            RepositoryOperation::Insert => Self::Create,
            RepositoryOperation::UpdateById => Self::Update,
            RepositoryOperation::DeleteById => Self::Delete,
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Request payload failed handler-level validation
    Validation,
    /// No entity has the requested id
    NotFound,
    /// The store refused a write (schema violation, duplicate key, bad id)
    PersistenceRejected,
    /// The store failed while reading or deleting
    PersistenceFault,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::PersistenceRejected => write!(f, "persistence_rejected"),
            Self::PersistenceFault => write!(f, "persistence_fault"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation | Self::PersistenceRejected => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PersistenceFault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Gateway failures during writes are the client's fault; the rest are ours
    #[must_use]
    pub const fn for_gateway_failure(operation: ApiOperation) -> Self {
        match operation {
            ApiOperation::Create | ApiOperation::Update => Self::PersistenceRejected,
            ApiOperation::List | ApiOperation::Get | ApiOperation::Delete => Self::PersistenceFault,
        }
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Message returned to the client
    pub message: String,
    /// The type of entity involved (e.g., "Book")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create payload failed pre-validation
    ///
    /// ```rust
    /// use book_service::handlers::{ApiError, ApiErrorKind};
    ///
    /// let error = ApiError::validation();
    /// assert_eq!(error.kind.status_code().as_u16(), 400);
    /// assert_eq!(error.message, "All fields required (title, author, publishedYear as number)");
    /// ```
    pub fn validation() -> Self {
        Self::new(
            ApiOperation::Create,
            ApiErrorKind::Validation,
            VALIDATION_MESSAGE,
        )
    }

    /// No entity of `entity_type` has this id
    pub fn not_found(
        operation: ApiOperation,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        let entity_type = entity_type.into();
        Self {
            operation,
            kind: ApiErrorKind::NotFound,
            message: format!("{} not found", entity_type),
            entity_type: Some(entity_type),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Key under which the message is placed in the JSON body
    ///
    /// Validation failures and list faults answer `{"message": ..}`; every
    /// other error answers `{"error": ..}`.
    #[must_use]
    pub fn body_key(&self) -> &'static str {
        match (self.kind, self.operation) {
            (ApiErrorKind::Validation, _) => "message",
            (ApiErrorKind::PersistenceFault, ApiOperation::List) => "message",
            _ => "error",
        }
    }

    /// JSON body sent to the client
    #[must_use]
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert(self.body_key().to_string(), Value::from(self.message.as_str()));
        Value::Object(body)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                status = status.as_u16(),
                "API error: {}", self.message
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                status = status.as_u16(),
                "API error: {}", self.message
            );
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = ApiOperation::from(err.operation);
        Self {
            operation,
            kind: ApiErrorKind::for_gateway_failure(operation),
            message: err.message,
            entity_type: err.entity_type,
            entity_id: err.entity_id,
        }
    }
}
