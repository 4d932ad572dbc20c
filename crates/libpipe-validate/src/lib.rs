//! Identifier validation.
//!
//! Shape-only checks for identifier fields. No check digits are verified.

pub mod column;
pub mod error;
pub mod isbn;

pub use column::{InvalidIsbn, IsbnReport, check_isbn_column};
pub use error::{Result, ValidateError};
pub use isbn::{is_isbn13_shape, validate_isbn};
