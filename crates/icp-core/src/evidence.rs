//! Evidence linking for risk rules.
//!
//! Every rule evaluation records which input values it read, so a fired
//! factor can always be traced back to the number or flag behind it.

use serde::{Deserialize, Serialize};

use crate::types::ClinicalInput;

/// A clinical input field a rule can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    BileAcids,
    Got,
    Gpt,
    TotalBilirubin,
    PrInterval,
    PrValue,
    Meconium,
    EarlyOnset,
    NoTreatmentResponse,
    GestationalWeeks,
}

impl InputField {
    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            InputField::BileAcids => "bileAcids",
            InputField::Got => "got",
            InputField::Gpt => "gpt",
            InputField::TotalBilirubin => "totalBilirubin",
            InputField::PrInterval => "prInterval",
            InputField::PrValue => "prValue",
            InputField::Meconium => "meconium",
            InputField::EarlyOnset => "earlyOnset",
            InputField::NoTreatmentResponse => "noTreatmentResponse",
            InputField::GestationalWeeks => "gestationalWeeks",
        }
    }

    /// Render the field's value from an input.
    pub fn observe(&self, input: &ClinicalInput) -> String {
        match self {
            InputField::BileAcids => input.bile_acids.to_string(),
            InputField::Got => input.got.to_string(),
            InputField::Gpt => input.gpt.to_string(),
            InputField::TotalBilirubin => input.total_bilirubin.to_string(),
            InputField::PrInterval => {
                if input.pr_interval.is_evaluated() {
                    "evaluated".to_string()
                } else {
                    "not_evaluated".to_string()
                }
            }
            InputField::PrValue => input.pr_value.to_string(),
            InputField::Meconium => input.meconium.to_string(),
            InputField::EarlyOnset => input.early_onset.to_string(),
            InputField::NoTreatmentResponse => input.no_treatment_response.to_string(),
            InputField::GestationalWeeks => input.gestational_weeks.to_string(),
        }
    }
}

/// A piece of evidence supporting a rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evidence {
    /// What this evidence supports
    pub claim: String,

    /// Pointer to the input field (e.g., "input.bileAcids")
    pub pointer: String,

    /// The value as it was compared
    pub observed: String,
}

impl Evidence {
    /// Create evidence from an input field.
    pub fn from_input(claim: impl Into<String>, field: InputField, input: &ClinicalInput) -> Self {
        Self {
            claim: claim.into(),
            pointer: format!("input.{}", field.name()),
            observed: field.observe(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_from_input() {
        let input = ClinicalInput {
            bile_acids: 120.0,
            ..Default::default()
        };
        let evidence = Evidence::from_input("Bile acids", InputField::BileAcids, &input);
        assert_eq!(evidence.pointer, "input.bileAcids");
        assert_eq!(evidence.observed, "120");
    }

    #[test]
    fn test_observe_pr_interval() {
        let mut input = ClinicalInput::default();
        assert_eq!(InputField::PrInterval.observe(&input), "not_evaluated");

        input.pr_interval = crate::types::PrInterval::Evaluated;
        assert_eq!(InputField::PrInterval.observe(&input), "evaluated");
    }
}
