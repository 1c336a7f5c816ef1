//! Submission parsing from YAML/JSON and coercion into `ClinicalInput`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use super::coerce::{parse_float_prefix, parse_int_prefix};
use super::schema::validate_submission_schema;
use crate::types::{ClinicalInput, PrInterval};

/// Errors that can occur when collecting a form submission.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Failed to read submission file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Submission failed schema validation: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Field {field} is not a number: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Option value the form posts for "yes".
const YES: &str = "si";

/// Option value the form posts when the PR interval was measured.
const PR_EVALUATED: &str = "evaluado";

/// A raw form submission, every value as posted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_weeks: Option<String>,

    /// Extra days past the completed weeks (defaults to "0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_days: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bile_acids: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bilirubin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub got: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpt: Option<String>,

    /// "no_evaluado" (default) or "evaluado"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_value: Option<String>,

    /// "si" or "no" (default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meconium: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_onset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_treatment_response: Option<String>,
}

/// A coerced submission: the evaluator input plus values only echoed back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectedForm {
    pub input: ClinicalInput,
    pub age: Option<i32>,
    pub gestational_days: Option<i32>,
}

impl FormSubmission {
    /// Parse a submission from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, FormError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a submission from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a submission from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a submission from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a submission file, choosing the format by extension.
    ///
    /// `.json` files are read as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    /// Validate an already-parsed submission and deserialize it.
    ///
    /// Numeric scalars are accepted in place of text and stringified.
    pub fn from_value(value: serde_json::Value) -> Result<Self, FormError> {
        validate_submission_schema(&value).map_err(FormError::SchemaError)?;
        Ok(serde_json::from_value(stringify_numbers(value))?)
    }

    /// Coerce the submission into an evaluator input.
    pub fn to_clinical_input(&self) -> Result<ClinicalInput, FormError> {
        self.collect().map(|form| form.input)
    }

    /// Coerce every field.
    ///
    /// Required numbers that do not start with a digit are rejected. Flags
    /// are true only for "si"; the PR interval counts as evaluated only for
    /// "evaluado".
    pub fn collect(&self) -> Result<CollectedForm, FormError> {
        let pr_interval = match self.pr_interval.as_deref() {
            Some(PR_EVALUATED) => PrInterval::Evaluated,
            _ => PrInterval::NotEvaluated,
        };

        let input = ClinicalInput {
            bile_acids: required_float("bileAcids", &self.bile_acids)?,
            got: required_float("got", &self.got)?,
            gpt: required_float("gpt", &self.gpt)?,
            total_bilirubin: required_float("totalBilirubin", &self.total_bilirubin)?,
            pr_interval,
            pr_value: self.pr_value(pr_interval)?,
            meconium: is_yes(&self.meconium),
            early_onset: is_yes(&self.early_onset),
            no_treatment_response: is_yes(&self.no_treatment_response),
            gestational_weeks: required_int("gestationalWeeks", &self.gestational_weeks)?,
        };

        Ok(CollectedForm {
            input,
            age: self.age.as_deref().and_then(|text| optional_int("age", text)),
            gestational_days: optional_int(
                "gestationalDays",
                self.gestational_days.as_deref().unwrap_or("0"),
            ),
        })
    }

    /// An empty PR value reads as 0. Unparseable text only matters when
    /// the interval was measured.
    fn pr_value(&self, pr_interval: PrInterval) -> Result<f64, FormError> {
        let text = match self.pr_value.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "0",
        };

        match parse_float_prefix(text) {
            Some(value) => Ok(value),
            None if pr_interval.is_evaluated() => Err(FormError::InvalidNumber {
                field: "prValue".to_string(),
                value: text.to_string(),
            }),
            None => {
                warn!(value = text, "Ignoring unparseable prValue, PR interval not evaluated");
                Ok(0.0)
            }
        }
    }
}

fn required_float(field: &str, value: &Option<String>) -> Result<f64, FormError> {
    let text = value
        .as_deref()
        .ok_or_else(|| FormError::MissingField(field.to_string()))?;

    parse_float_prefix(text).ok_or_else(|| FormError::InvalidNumber {
        field: field.to_string(),
        value: text.to_string(),
    })
}

fn required_int(field: &str, value: &Option<String>) -> Result<i32, FormError> {
    let text = value
        .as_deref()
        .ok_or_else(|| FormError::MissingField(field.to_string()))?;

    parse_int_prefix(text).ok_or_else(|| FormError::InvalidNumber {
        field: field.to_string(),
        value: text.to_string(),
    })
}

fn optional_int(field: &str, text: &str) -> Option<i32> {
    let parsed = parse_int_prefix(text);
    if parsed.is_none() {
        warn!(field, value = text, "Ignoring unparseable optional field");
    }
    parsed
}

fn is_yes(value: &Option<String>) -> bool {
    value.as_deref() == Some(YES)
}

/// Replace top-level numbers with their text form.
fn stringify_numbers(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(key, v)| match v {
                    serde_json::Value::Number(n) => (key, serde_json::Value::String(n.to_string())),
                    other => (key, other),
                })
                .collect(),
        ),
        other => other,
    }
}
