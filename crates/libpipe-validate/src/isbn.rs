//! ISBN-13 shape validation.

use libpipe_model::Value;

/// Returns true when `candidate` has the shape of an ISBN-13: after
/// removing hyphens and surrounding whitespace, exactly 13 ASCII digits.
///
/// ```
/// use libpipe_validate::is_isbn13_shape;
///
/// assert!(is_isbn13_shape("978-3-16-148410-0"));
/// assert!(!is_isbn13_shape("3-16-148410-X"));
/// ```
pub fn is_isbn13_shape(candidate: &str) -> bool {
    let digits = candidate.replace('-', "");
    let digits = digits.trim();
    digits.len() == 13 && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Validates one cell as an ISBN-13.
///
/// Absent and empty values are invalid. Integers are checked through their
/// decimal text. Floats always carry a fractional part in their text form
/// and are rejected, as are booleans and dates.
pub fn validate_isbn(value: &Value) -> bool {
    match value {
        Value::Text(text) => !text.is_empty() && is_isbn13_shape(text),
        Value::Integer(number) => is_isbn13_shape(&number.to_string()),
        Value::Absent | Value::Float(_) | Value::Boolean(_) | Value::Date(_) => false,
    }
}
