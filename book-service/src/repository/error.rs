//! Repository error types
//!
//! Structured errors raised by the persistence gateway. The handler layer
//! decides what they mean for the client; the repository only reports what
//! went wrong and during which operation.
//!
//! # Example
//!
//! ```rust
//! use book_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::invalid_id(RepositoryOperation::FindById, "abc");
//! assert!(matches!(error.kind, RepositoryErrorKind::InvalidId));
//! assert_eq!(error.entity_id.as_deref(), Some("abc"));
//! ```

use std::fmt;

use crate::models::{InvalidBookId, SchemaViolation};

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Listing every document in the collection
    FindAll,
    /// Finding a single document by ID
    FindById,
    /// Inserting a new document
    Insert,
    /// Updating a document by ID
    UpdateById,
    /// Deleting a document by ID
    DeleteById,
    /// Checking that the store is reachable
    Ping,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindAll => write!(f, "find_all"),
            Self::FindById => write!(f, "find_by_id"),
            Self::Insert => write!(f, "insert"),
            Self::UpdateById => write!(f, "update_by_id"),
            Self::DeleteById => write!(f, "delete_by_id"),
            Self::Ping => write!(f, "ping"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// A unique field already holds this value
    AlreadyExists,
    /// Document does not satisfy the collection schema
    ValidationFailed,
    /// The supplied identifier is malformed
    InvalidId,
    /// Failed to reach the store
    ConnectionFailed,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::InvalidId => write!(f, "invalid_id"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Book")
    pub entity_type: Option<String>,
    /// The ID (or unique key) of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// A unique field collided with an existing document
    ///
    /// ```rust
    /// use book_service::repository::{RepositoryError, RepositoryOperation};
    ///
    /// let error = RepositoryError::already_exists(RepositoryOperation::Insert, "isbn", "978-0451524935");
    /// assert_eq!(
    ///     error.message,
    ///     "duplicate key error: isbn \"978-0451524935\" already exists"
    /// );
    /// ```
    pub fn already_exists(
        operation: RepositoryOperation,
        field: &str,
        value: impl Into<String>,
    ) -> Self {
        let value = value.into();
        Self {
            operation,
            kind: RepositoryErrorKind::AlreadyExists,
            message: format!("duplicate key error: {} \"{}\" already exists", field, value),
            entity_type: Some("Book".to_string()),
            entity_id: Some(value),
        }
    }

    /// The supplied identifier could not be parsed
    pub fn invalid_id(operation: RepositoryOperation, raw_id: impl Into<String>) -> Self {
        let raw_id = raw_id.into();
        Self {
            operation,
            kind: RepositoryErrorKind::InvalidId,
            message: InvalidBookId(raw_id.clone()).to_string(),
            entity_type: Some("Book".to_string()),
            entity_id: Some(raw_id),
        }
    }

    /// Document failed schema validation
    pub fn validation_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ValidationFailed, message)
    }

    /// Store could not be reached
    pub fn connection_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ConnectionFailed, message)
    }
}

impl From<(RepositoryOperation, SchemaViolation)> for RepositoryError {
    fn from((operation, violation): (RepositoryOperation, SchemaViolation)) -> Self {
        Self::validation_failed(operation, violation.to_string())
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_operation_display() {
        assert_eq!(RepositoryOperation::FindAll.to_string(), "find_all");
        assert_eq!(RepositoryOperation::FindById.to_string(), "find_by_id");
        assert_eq!(RepositoryOperation::Insert.to_string(), "insert");
        assert_eq!(RepositoryOperation::UpdateById.to_string(), "update_by_id");
        assert_eq!(RepositoryOperation::DeleteById.to_string(), "delete_by_id");
        assert_eq!(RepositoryOperation::Ping.to_string(), "ping");
    }

    #[test]
    fn test_invalid_id_message() {
        let error = RepositoryError::invalid_id(RepositoryOperation::DeleteById, "xyz");
        assert_eq!(error.kind, RepositoryErrorKind::InvalidId);
        assert_eq!(error.operation, RepositoryOperation::DeleteById);
        assert_eq!(error.message, "Cast to BookId failed for value \"xyz\"");
    }

    #[test]
    fn test_already_exists_keeps_value() {
        let error =
            RepositoryError::already_exists(RepositoryOperation::UpdateById, "isbn", "123");
        assert_eq!(error.kind, RepositoryErrorKind::AlreadyExists);
        assert_eq!(error.entity_id.as_deref(), Some("123"));
    }

    #[test]
    fn test_schema_violation_conversion() {
        let violation = crate::models::Book::from_document(
            crate::models::BookId::new(),
            &serde_json::json!({ "author": "Orwell", "publishedYear": 1949 }),
        )
        .unwrap_err();
        let error = RepositoryError::from((RepositoryOperation::Insert, violation));
        assert_eq!(error.kind, RepositoryErrorKind::ValidationFailed);
        assert!(error.message.starts_with("Book validation failed: title"));
    }

    #[test]
    fn test_display_names_the_offending_value() {
        let error = RepositoryError::invalid_id(RepositoryOperation::FindById, "b1");
        let display = error.to_string();
        assert!(display.contains("invalid_id"));
        assert!(display.contains("find_by_id"));
        assert!(display.ends_with("[Book: b1]"));
    }

    #[test]
    fn test_display_without_entity() {
        let error = RepositoryError::connection_failed(RepositoryOperation::Ping, "refused");
        assert_eq!(
            error.to_string(),
            "Repository connection_failed error during ping: refused"
        );
    }
}
