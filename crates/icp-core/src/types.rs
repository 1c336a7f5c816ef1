//! Core types for ICP risk evaluation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evidence::Evidence;

/// Whether the PR interval was measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrInterval {
    #[default]
    NotEvaluated,
    Evaluated,
}

impl PrInterval {
    pub fn is_evaluated(&self) -> bool {
        matches!(self, PrInterval::Evaluated)
    }
}

/// Clinical values for a single evaluation request.
///
/// Numeric fields are compared against thresholds as given; the evaluator
/// never rejects out-of-domain values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInput {
    /// Serum bile acids (μmol/L)
    pub bile_acids: f64,

    /// GOT / AST (U/L)
    pub got: f64,

    /// GPT / ALT (U/L)
    pub gpt: f64,

    /// Total bilirubin (mg/dL)
    pub total_bilirubin: f64,

    /// Whether the PR interval was evaluated
    #[serde(default)]
    pub pr_interval: PrInterval,

    /// PR interval (ms), only meaningful when evaluated
    #[serde(default)]
    pub pr_value: f64,

    /// Meconium-stained amniotic fluid
    #[serde(default)]
    pub meconium: bool,

    /// Onset before 30 weeks
    #[serde(default)]
    pub early_onset: bool,

    /// No response to treatment
    #[serde(default)]
    pub no_treatment_response: bool,

    /// Completed gestational weeks
    pub gestational_weeks: i32,
}

/// Ordinal risk tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Name shown on the result panel.
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "BAJO",
            RiskLevel::Medium => "MEDIANO",
            RiskLevel::High => "ALTO",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome handed to a presenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,

    /// Labels of the rules that fired, in evaluation order
    pub triggered_factors: Vec<String>,

    pub recommendation: String,
}

/// Result of checking a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleResult {
    Fired,
    NotFired,
    /// Medium-tier rules are not checked once a high-tier rule fired
    Skipped,
}

/// Trace entry for one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEvaluation {
    /// Rule identifier (H1-H4, M1-M6)
    pub rule_id: String,

    pub label: String,

    /// Tier this rule escalates to
    pub tier: RiskLevel,

    pub result: RuleResult,

    /// Input values the rule read (empty when skipped)
    pub evidence: Vec<Evidence>,
}

/// Assessment plus the per-rule trace that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub assessment: RiskAssessment,
    pub rules_evaluated: Vec<RuleEvaluation>,
}

impl Evaluation {
    /// Rules that fired, in evaluation order.
    pub fn fired(&self) -> impl Iterator<Item = &RuleEvaluation> {
        self.rules_evaluated
            .iter()
            .filter(|r| r.result == RuleResult::Fired)
    }
}

/// Assessment envelope for presenters.
///
/// Carries form values the evaluator never reads so they can be shown
/// alongside the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessment: RiskAssessment,

    pub evaluated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_weeks: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_days: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl AssessmentReport {
    pub fn new(assessment: RiskAssessment) -> Self {
        Self {
            assessment,
            evaluated_at: Utc::now(),
            gestational_weeks: None,
            gestational_days: None,
            age: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(
            [RiskLevel::Medium, RiskLevel::High, RiskLevel::Low]
                .into_iter()
                .max(),
            Some(RiskLevel::High)
        );
    }

    #[test]
    fn test_clinical_input_wire_names() {
        let json = serde_json::json!({
            "bileAcids": 50.0,
            "got": 10.0,
            "gpt": 10.0,
            "totalBilirubin": 0.5,
            "prInterval": "evaluated",
            "prValue": 160.0,
            "meconium": false,
            "earlyOnset": true,
            "noTreatmentResponse": false,
            "gestationalWeeks": 30
        });

        let input: ClinicalInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.bile_acids, 50.0);
        assert_eq!(input.pr_interval, PrInterval::Evaluated);
        assert!(input.early_onset);
        assert_eq!(input.gestational_weeks, 30);
    }

    #[test]
    fn test_assessment_serializes_camel_case() {
        let assessment = RiskAssessment {
            level: RiskLevel::Medium,
            triggered_factors: vec!["GOT elevado (>40 U/L)".to_string()],
            recommendation: "x".to_string(),
        };

        let value = serde_json::to_value(&assessment).unwrap();
        assert_eq!(value["level"], "medium");
        assert_eq!(value["triggeredFactors"][0], "GOT elevado (>40 U/L)");
    }

    #[test]
    fn test_report_omits_missing_echo_fields() {
        let report = AssessmentReport::new(RiskAssessment {
            level: RiskLevel::Low,
            triggered_factors: vec![],
            recommendation: String::new(),
        });

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("gestational_days").is_none());
        assert!(value.get("evaluated_at").is_some());
    }
}
