//! Book entity and the collection schema enforced by the document store
//!
//! Documents arrive as raw JSON. The store turns them into [`Book`] records
//! through [`Book::from_document`] (insert) and [`Book::merged_with`] (update),
//! which apply the collection schema:
//!
//! - `title` and `author` are required, non-empty strings
//! - `publishedYear` is a required integral JSON number
//! - `isbn` is an optional string, `publishedDate` an optional `YYYY-MM-DD` date
//! - keys outside the schema (including `id` / `_id`) are ignored
//!
//! # Example
//!
//! ```rust
//! use book_service::models::{Book, BookId};
//! use serde_json::json;
//!
//! let book = Book::from_document(
//!     BookId::new(),
//!     &json!({ "title": "1984", "author": "Orwell", "publishedYear": 1949 }),
//! )
//! .unwrap();
//! assert_eq!(book.published_year, 1949);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

const TITLE: &str = "title";
const AUTHOR: &str = "author";
const PUBLISHED_YEAR: &str = "publishedYear";
const ISBN: &str = "isbn";
const PUBLISHED_DATE: &str = "publishedDate";

/// Keys the collection schema knows about
pub const SCHEMA_FIELDS: &[&str] = &[TITLE, AUTHOR, PUBLISHED_YEAR, ISBN, PUBLISHED_DATE];

/// Unique identifier assigned by the store on insert
///
/// Backed by a UUIDv7 so identifiers sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidBookId(s.to_string()))
    }
}

/// A raw id that could not be parsed into a [`BookId`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cast to BookId failed for value \"{0}\"")]
pub struct InvalidBookId(pub String);

/// A document that does not satisfy the collection schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Book validation failed: {field}: {reason}")]
pub struct SchemaViolation {
    /// Offending field (or `document` when the payload itself is malformed)
    pub field: &'static str,
    /// Why the value was rejected
    pub reason: String,
}

impl SchemaViolation {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    fn required(field: &'static str) -> Self {
        Self::new(field, format!("Path `{}` is required", field))
    }

    fn wrong_type(field: &'static str, expected: &str, found: &Value) -> Self {
        Self::new(
            field,
            format!("expected {}, got {}", expected, value_kind(found)),
        )
    }
}

/// A persisted book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
}

impl Book {
    /// Build a record from an inserted document, assigning it `id`
    pub fn from_document(id: BookId, document: &Value) -> Result<Self, SchemaViolation> {
        let fields = document
            .as_object()
            .ok_or_else(|| SchemaViolation::wrong_type("document", "an object", document))?;

        Ok(Self {
            id,
            title: required_string(fields, TITLE)?,
            author: required_string(fields, AUTHOR)?,
            published_year: required_year(fields)?,
            isbn: optional_string(fields, ISBN)?,
            published_date: optional_date(fields)?,
        })
    }

    /// Apply an update document over this record
    ///
    /// Keys present in `document` replace the stored values, `null` clears an
    /// optional field, and absent keys keep their current value. The merged
    /// record is checked against the full schema, so an update can never
    /// leave a required field empty. The id is never changed.
    pub fn merged_with(&self, document: &Value) -> Result<Self, SchemaViolation> {
        let changes = document
            .as_object()
            .ok_or_else(|| SchemaViolation::wrong_type("document", "an object", document))?;

        let mut fields = self.to_fields();
        for (key, value) in changes {
            if SCHEMA_FIELDS.contains(&key.as_str()) {
                fields.insert(key.clone(), value.clone());
            }
        }

        Self::from_document(self.id, &Value::Object(fields))
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(TITLE.to_string(), Value::from(self.title.as_str()));
        fields.insert(AUTHOR.to_string(), Value::from(self.author.as_str()));
        fields.insert(PUBLISHED_YEAR.to_string(), Value::from(self.published_year));
        if let Some(isbn) = &self.isbn {
            fields.insert(ISBN.to_string(), Value::from(isbn.as_str()));
        }
        if let Some(date) = &self.published_date {
            fields.insert(
                PUBLISHED_DATE.to_string(),
                Value::from(date.format("%Y-%m-%d").to_string()),
            );
        }
        fields
    }
}

fn required_string(fields: &Map<String, Value>, key: &'static str) -> Result<String, SchemaViolation> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(SchemaViolation::required(key)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(SchemaViolation::required(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaViolation::wrong_type(key, "a string", other)),
    }
}

fn optional_string(
    fields: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, SchemaViolation> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaViolation::wrong_type(key, "a string", other)),
    }
}

fn required_year(fields: &Map<String, Value>) -> Result<i32, SchemaViolation> {
    match fields.get(PUBLISHED_YEAR) {
        None | Some(Value::Null) => Err(SchemaViolation::required(PUBLISHED_YEAR)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| integral_f64(n.as_f64()?))
            .and_then(|year| i32::try_from(year).ok())
            .ok_or_else(|| {
                SchemaViolation::new(PUBLISHED_YEAR, format!("expected an integer year, got {}", n))
            }),
        Some(other) => Err(SchemaViolation::wrong_type(PUBLISHED_YEAR, "a number", other)),
    }
}

/// `2022.0` and `1e3` are integers written as floats
fn integral_f64(value: f64) -> Option<i64> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn optional_date(fields: &Map<String, Value>) -> Result<Option<NaiveDate>, SchemaViolation> {
    match fields.get(PUBLISHED_DATE) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                SchemaViolation::new(PUBLISHED_DATE, format!("expected a YYYY-MM-DD date, got \"{}\"", s))
            }),
        Some(other) => Err(SchemaViolation::wrong_type(PUBLISHED_DATE, "a date string", other)),
    }
}

/// JSON type name used in error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orwell() -> Book {
        Book::from_document(
            BookId::new(),
            &json!({ "title": "1984", "author": "Orwell", "publishedYear": 1949 }),
        )
        .unwrap()
    }

    #[test]
    fn test_book_id_display_parses_back() {
        let id = BookId::new();
        let parsed: BookId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_book_id_rejects_garbage() {
        let err = "not-an-id".parse::<BookId>().unwrap_err();
        assert_eq!(err.to_string(), "Cast to BookId failed for value \"not-an-id\"");
    }

    #[test]
    fn test_from_document_full() {
        let id = BookId::new();
        let book = Book::from_document(
            id,
            &json!({
                "title": "The Great Gatsby",
                "author": "F. Scott Fitzgerald",
                "publishedYear": 1925,
                "isbn": "978-0743273565",
                "publishedDate": "1925-04-10"
            }),
        )
        .unwrap();

        assert_eq!(book.id, id);
        assert_eq!(book.isbn.as_deref(), Some("978-0743273565"));
        assert_eq!(book.published_date, NaiveDate::from_ymd_opt(1925, 4, 10));
    }

    #[test]
    fn test_from_document_ignores_unknown_and_id_keys() {
        let id = BookId::new();
        let book = Book::from_document(
            id,
            &json!({
                "id": "forged",
                "_id": "forged",
                "title": "1984",
                "author": "Orwell",
                "publishedYear": 1949,
                "genre": "dystopia"
            }),
        )
        .unwrap();
        assert_eq!(book.id, id);

        let wire = serde_json::to_value(&book).unwrap();
        assert!(wire.get("genre").is_none());
        assert!(wire.get("_id").is_none());
    }

    #[test]
    fn test_from_document_rejects_missing_title() {
        let err = Book::from_document(
            BookId::new(),
            &json!({ "author": "Orwell", "publishedYear": 1949 }),
        )
        .unwrap_err();
        assert_eq!(err.field, "title");
        assert!(err.to_string().contains("Path `title` is required"));
    }

    #[test]
    fn test_from_document_rejects_numeric_string_year() {
        let err = Book::from_document(
            BookId::new(),
            &json!({ "title": "1984", "author": "Orwell", "publishedYear": "1949" }),
        )
        .unwrap_err();
        assert_eq!(err.field, "publishedYear");
        assert!(err.reason.contains("got string"));
    }

    #[test]
    fn test_from_document_rejects_fractional_year() {
        let err = Book::from_document(
            BookId::new(),
            &json!({ "title": "1984", "author": "Orwell", "publishedYear": 1949.5 }),
        )
        .unwrap_err();
        assert_eq!(err.field, "publishedYear");
    }

    #[test]
    fn test_from_document_accepts_integral_float_year() {
        let book = Book::from_document(
            BookId::new(),
            &json!({ "title": "1984", "author": "Orwell", "publishedYear": 2022.0 }),
        )
        .unwrap();
        assert_eq!(book.published_year, 2022);

        let book = Book::from_document(
            BookId::new(),
            &serde_json::from_str(r#"{ "title": "T", "author": "A", "publishedYear": 1e3 }"#)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(book.published_year, 1000);
    }

    #[test]
    fn test_from_document_rejects_out_of_range_year() {
        let err = Book::from_document(
            BookId::new(),
            &json!({ "title": "T", "author": "A", "publishedYear": 1e12 }),
        )
        .unwrap_err();
        assert_eq!(err.field, "publishedYear");
    }

    #[test]
    fn test_from_document_rejects_bad_date() {
        let err = Book::from_document(
            BookId::new(),
            &json!({
                "title": "1984",
                "author": "Orwell",
                "publishedYear": 1949,
                "publishedDate": "June 1949"
            }),
        )
        .unwrap_err();
        assert_eq!(err.field, "publishedDate");
    }

    #[test]
    fn test_from_document_rejects_non_object() {
        let err = Book::from_document(BookId::new(), &json!(["1984"])).unwrap_err();
        assert_eq!(err.field, "document");
        assert!(err.reason.contains("got array"));
    }

    #[test]
    fn test_merged_with_partial_update_keeps_other_fields() {
        let book = orwell();
        let updated = book
            .merged_with(&json!({ "title": "Nineteen Eighty-Four" }))
            .unwrap();

        assert_eq!(updated.id, book.id);
        assert_eq!(updated.title, "Nineteen Eighty-Four");
        assert_eq!(updated.author, "Orwell");
        assert_eq!(updated.published_year, 1949);
    }

    #[test]
    fn test_merged_with_cannot_change_id() {
        let book = orwell();
        let updated = book
            .merged_with(&json!({ "id": BookId::new().to_string() }))
            .unwrap();
        assert_eq!(updated, book);
    }

    #[test]
    fn test_merged_with_null_clears_optional_field() {
        let book = orwell()
            .merged_with(&json!({ "isbn": "978-0451524935" }))
            .unwrap();
        assert!(book.isbn.is_some());

        let cleared = book.merged_with(&json!({ "isbn": null })).unwrap();
        assert!(cleared.isbn.is_none());
    }

    #[test]
    fn test_merged_with_null_required_field_is_violation() {
        let err = orwell().merged_with(&json!({ "author": null })).unwrap_err();
        assert_eq!(err.field, "author");
    }

    #[test]
    fn test_merged_with_wrong_type_is_violation() {
        let err = orwell()
            .merged_with(&json!({ "publishedYear": "soon" }))
            .unwrap_err();
        assert_eq!(err.field, "publishedYear");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let book = orwell();
        let wire = serde_json::to_value(&book).unwrap();
        assert_eq!(wire["publishedYear"], json!(1949));
        assert_eq!(wire["id"], json!(book.id.to_string()));
        assert!(wire.get("isbn").is_none());
        assert!(wire.get("publishedDate").is_none());
    }
}
