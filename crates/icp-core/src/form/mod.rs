//! Form collection.
//!
//! Assessment forms post every value as text. This module validates a raw
//! submission against JSON Schema and coerces it into a `ClinicalInput`
//! the same way the browser form does.

mod coerce;
mod parser;
mod schema;

pub use coerce::{parse_float_prefix, parse_int_prefix};
pub use parser::{CollectedForm, FormError, FormSubmission};
pub use schema::{is_valid_submission, validate_submission_schema, SchemaError};
