//! JSON Schema validation for form submissions.
//!
//! Submissions are validated against schema/form.schema.json. The schema
//! checks shape and option values only; clinical ranges are never enforced.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded submission schema (loaded at compile time).
const FORM_SCHEMA_JSON: &str = include_str!("../../../../schema/form.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(FORM_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(SchemaError::LoadError(e.clone())),
    }
}

/// Validate a raw submission against the schema.
///
/// Returns every validation error, each suffixed with the instance path.
pub fn validate_submission_schema(submission: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(submission)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check if a raw submission is valid against the schema.
pub fn is_valid_submission(submission: &serde_json::Value) -> bool {
    get_validator()
        .map(|v| v.is_valid(submission))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> serde_json::Value {
        serde_json::json!({
            "gestationalWeeks": "32",
            "bileAcids": "120",
            "totalBilirubin": "0.5",
            "got": "10",
            "gpt": "10"
        })
    }

    #[test]
    fn test_minimal_submission_passes() {
        assert!(validate_submission_schema(&minimal()).is_ok());
    }

    #[test]
    fn test_full_submission_passes() {
        let value = serde_json::json!({
            "age": "31",
            "gestationalWeeks": "35",
            "gestationalDays": "4",
            "bileAcids": "64.2",
            "totalBilirubin": "1.4",
            "got": "55",
            "gpt": "61",
            "prInterval": "evaluado",
            "prValue": "142",
            "meconium": "no",
            "earlyOnset": "si",
            "noTreatmentResponse": "no"
        });
        assert!(validate_submission_schema(&value).is_ok());
    }

    #[test]
    fn test_numbers_accepted_for_text_fields() {
        let mut value = minimal();
        value["bileAcids"] = serde_json::json!(120.5);
        assert!(validate_submission_schema(&value).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("got");

        let errors = validate_submission_schema(&value).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_unknown_option_value_fails() {
        let mut value = minimal();
        value["meconium"] = serde_json::json!("yes");
        assert!(validate_submission_schema(&value).is_err());

        let mut value = minimal();
        value["prInterval"] = serde_json::json!("evaluated");
        assert!(validate_submission_schema(&value).is_err());
    }

    #[test]
    fn test_additional_properties_fail() {
        let mut value = minimal();
        value["unknownField"] = serde_json::json!("x");
        assert!(validate_submission_schema(&value).is_err());
    }

    #[test]
    fn test_is_valid_helper() {
        assert!(is_valid_submission(&minimal()));
        assert!(!is_valid_submission(&serde_json::json!({ "got": "10" })));
    }
}
