//! Domain models

mod book;

pub use book::{Book, BookId, InvalidBookId, SchemaViolation, SCHEMA_FIELDS};
pub(crate) use book::value_kind;
