//! Risk rule tables.
//!
//! Rules are data: each entry names the tier it escalates to, the label
//! reported when it fires, the input fields it reads and its predicate.
//! Table order is evaluation order and therefore the order of
//! `triggered_factors`.

use std::fmt;

use crate::evidence::{Evidence, InputField};
use crate::thresholds::{
    BILE_ACIDS_HIGH, BILE_ACIDS_MEDIUM, BILIRUBIN_LIMIT, GOT_LIMIT, GPT_LIMIT,
    PR_INTERVAL_LIMIT, TERM_WEEKS,
};
use crate::types::{ClinicalInput, RiskLevel, RuleEvaluation, RuleResult};

/// A single classification rule.
#[derive(Clone, Copy)]
pub struct RiskRule {
    /// Stable identifier (H1-H4, M1-M6)
    pub id: &'static str,

    /// Tier the rule escalates to when it fires
    pub tier: RiskLevel,

    /// Human-readable factor label
    pub label: &'static str,

    /// Fields read by the predicate
    pub fields: &'static [InputField],

    predicate: fn(&ClinicalInput) -> bool,
}

impl fmt::Debug for RiskRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskRule")
            .field("id", &self.id)
            .field("tier", &self.tier)
            .field("label", &self.label)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl RiskRule {
    /// Check the rule against an input.
    pub fn fires(&self, input: &ClinicalInput) -> bool {
        (self.predicate)(input)
    }

    /// Evaluate and record the outcome with evidence.
    pub fn evaluate(&self, input: &ClinicalInput) -> RuleEvaluation {
        let fired = self.fires(input);
        let evidence = self
            .fields
            .iter()
            .map(|field| Evidence::from_input(self.label, *field, input))
            .collect();

        RuleEvaluation {
            rule_id: self.id.to_string(),
            label: self.label.to_string(),
            tier: self.tier,
            result: if fired {
                RuleResult::Fired
            } else {
                RuleResult::NotFired
            },
            evidence,
        }
    }

    /// Record the rule as not checked.
    pub fn skipped(&self) -> RuleEvaluation {
        RuleEvaluation {
            rule_id: self.id.to_string(),
            label: self.label.to_string(),
            tier: self.tier,
            result: RuleResult::Skipped,
            evidence: vec![],
        }
    }
}

// =========================================================================
// HIGH-TIER PREDICATES
// =========================================================================

fn bile_acids_severe(input: &ClinicalInput) -> bool {
    input.bile_acids >= BILE_ACIDS_HIGH
}

fn meconium_present(input: &ClinicalInput) -> bool {
    input.meconium
}

fn treatment_failed(input: &ClinicalInput) -> bool {
    input.no_treatment_response
}

fn pr_prolonged(input: &ClinicalInput) -> bool {
    input.pr_interval.is_evaluated() && input.pr_value > PR_INTERVAL_LIMIT
}

// =========================================================================
// MEDIUM-TIER PREDICATES
// =========================================================================

fn bile_acids_moderate(input: &ClinicalInput) -> bool {
    input.bile_acids >= BILE_ACIDS_MEDIUM && input.bile_acids < BILE_ACIDS_HIGH
}

fn got_elevated(input: &ClinicalInput) -> bool {
    input.got > GOT_LIMIT
}

fn gpt_elevated(input: &ClinicalInput) -> bool {
    input.gpt > GPT_LIMIT
}

fn bilirubin_elevated(input: &ClinicalInput) -> bool {
    input.total_bilirubin > BILIRUBIN_LIMIT
}

fn at_term(input: &ClinicalInput) -> bool {
    input.gestational_weeks >= TERM_WEEKS
}

fn early_onset(input: &ClinicalInput) -> bool {
    input.early_onset
}

/// Pass 1: any of these makes the case high risk.
pub static HIGH_TIER_RULES: [RiskRule; 4] = [
    RiskRule {
        id: "H1",
        tier: RiskLevel::High,
        label: "Ácidos biliares ≥ 100 μmol/L",
        fields: &[InputField::BileAcids],
        predicate: bile_acids_severe,
    },
    RiskRule {
        id: "H2",
        tier: RiskLevel::High,
        label: "Presencia de meconio",
        fields: &[InputField::Meconium],
        predicate: meconium_present,
    },
    RiskRule {
        id: "H3",
        tier: RiskLevel::High,
        label: "Falta de respuesta al tratamiento",
        fields: &[InputField::NoTreatmentResponse],
        predicate: treatment_failed,
    },
    RiskRule {
        id: "H4",
        tier: RiskLevel::High,
        label: "Intervalo PR prolongado (>150ms)",
        fields: &[InputField::PrInterval, InputField::PrValue],
        predicate: pr_prolonged,
    },
];

/// Pass 2: only checked when no high-tier rule fired.
pub static MEDIUM_TIER_RULES: [RiskRule; 6] = [
    RiskRule {
        id: "M1",
        tier: RiskLevel::Medium,
        label: "Ácidos biliares entre 40-99 μmol/L",
        fields: &[InputField::BileAcids],
        predicate: bile_acids_moderate,
    },
    RiskRule {
        id: "M2",
        tier: RiskLevel::Medium,
        label: "GOT elevado (>40 U/L)",
        fields: &[InputField::Got],
        predicate: got_elevated,
    },
    RiskRule {
        id: "M3",
        tier: RiskLevel::Medium,
        label: "GPT elevado (>40 U/L)",
        fields: &[InputField::Gpt],
        predicate: gpt_elevated,
    },
    RiskRule {
        id: "M4",
        tier: RiskLevel::Medium,
        label: "Bilirrubina total elevada (>1.2 mg/dL)",
        fields: &[InputField::TotalBilirubin],
        predicate: bilirubin_elevated,
    },
    RiskRule {
        id: "M5",
        tier: RiskLevel::Medium,
        label: "Edad gestacional ≥ 37 semanas",
        fields: &[InputField::GestationalWeeks],
        predicate: at_term,
    },
    RiskRule {
        id: "M6",
        tier: RiskLevel::Medium,
        label: "Inicio precoz (<30 semanas)",
        fields: &[InputField::EarlyOnset],
        predicate: early_onset,
    },
];

/// Every rule, pass 1 first.
pub fn all_rules() -> impl Iterator<Item = &'static RiskRule> {
    HIGH_TIER_RULES.iter().chain(MEDIUM_TIER_RULES.iter())
}
