//! # icp-core
//!
//! Deterministic risk evaluation for intrahepatic cholestasis of pregnancy.
//!
//! Given biochemical and clinical values, this crate answers:
//! - Which risk tier does the case fall in (low, medium, high)?
//! - Which factors put it there?
//! - What follow-up is recommended?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **Total**: Every input is classified; out-of-range values are compared as given
//! 3. **Traceable**: Every triggered factor cites the input values behind it
//! 4. **Stateless**: No memory across calls, safe to share across threads
//!
//! ## Example
//!
//! ```rust
//! use icp_core::{evaluate, ClinicalInput, RiskLevel};
//!
//! let input = ClinicalInput {
//!     bile_acids: 120.0,
//!     got: 10.0,
//!     gpt: 10.0,
//!     total_bilirubin: 0.5,
//!     gestational_weeks: 32,
//!     ..Default::default()
//! };
//!
//! let assessment = evaluate(input);
//! assert_eq!(assessment.level, RiskLevel::High);
//! assert_eq!(assessment.triggered_factors, vec!["Ácidos biliares ≥ 100 μmol/L"]);
//! ```

pub mod evaluator;
pub mod evidence;
pub mod form;
pub mod recommendations;
pub mod rules;
pub mod thresholds;
pub mod types;

// Re-export main types at crate root
pub use evaluator::RiskEvaluator;
pub use evidence::{Evidence, InputField};
pub use form::{CollectedForm, FormError, FormSubmission};
pub use rules::{RiskRule, HIGH_TIER_RULES, MEDIUM_TIER_RULES};
pub use types::{
    AssessmentReport, ClinicalInput, Evaluation, PrInterval, RiskAssessment, RiskLevel,
    RuleEvaluation, RuleResult,
};

/// Classify a case.
///
/// This is the main entry point. It never fails: numeric fields are
/// compared against the thresholds as given, whatever their range.
pub fn evaluate(input: ClinicalInput) -> RiskAssessment {
    evaluate_detailed(&input).assessment
}

/// Classify a case and keep the per-rule trace.
pub fn evaluate_detailed(input: &ClinicalInput) -> Evaluation {
    RiskEvaluator::new().evaluate(input)
}

/// Evaluate a collected form and wrap the result for presentation.
///
/// Values the evaluator never reads (age, extra gestational days) are
/// echoed into the report unchanged.
pub fn assess(form: &CollectedForm) -> AssessmentReport {
    AssessmentReport {
        gestational_weeks: Some(form.input.gestational_weeks),
        gestational_days: form.gestational_days,
        age: form.age,
        ..AssessmentReport::new(evaluate(form.input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(bile_acids: f64, got: f64, gestational_weeks: i32) -> ClinicalInput {
        ClinicalInput {
            bile_acids,
            got,
            gpt: 10.0,
            total_bilirubin: 0.5,
            pr_interval: PrInterval::NotEvaluated,
            pr_value: 0.0,
            meconium: false,
            early_onset: false,
            no_treatment_response: false,
            gestational_weeks,
        }
    }

    const SUFFIX: &str = " Se sugiere tratamiento con ácido ursodesoxicólico.";

    #[test]
    fn test_scenario_a_high() {
        let assessment = evaluate(scenario(120.0, 10.0, 32));

        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(
            assessment.triggered_factors,
            vec!["Ácidos biliares ≥ 100 μmol/L"]
        );
        assert_eq!(
            assessment.recommendation,
            format!(
                "{}{}",
                "Monitoreo intensivo de ácidos biliares y función hepática (2-3 veces por semana). Tratamiento con ácido ursodeoxicólico en dosis altas. Planear el parto entre las 34-36 semanas según severidad. Considerar corticosteroides para maduración pulmonar si <34 semanas. Monitoreo fetal diario.",
                SUFFIX
            )
        );
    }

    #[test]
    fn test_scenario_b_medium() {
        let assessment = evaluate(scenario(50.0, 50.0, 30));

        assert_eq!(assessment.level, RiskLevel::Medium);
        assert_eq!(
            assessment.triggered_factors,
            vec!["Ácidos biliares entre 40-99 μmol/L", "GOT elevado (>40 U/L)"]
        );
        assert_eq!(
            assessment.recommendation,
            format!(
                "{}{}",
                "Monitoreo semanal de ácidos biliares y enzimas hepáticas. Iniciar tratamiento con ácido ursodeoxicólico. Considerar inducción del parto a las 37-38 semanas. Monitoreo fetal más frecuente.",
                SUFFIX
            )
        );
    }

    #[test]
    fn test_scenario_c_low() {
        let assessment = evaluate(scenario(5.0, 10.0, 30));

        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.triggered_factors.is_empty());
        assert_eq!(
            assessment.recommendation,
            "Seguimiento regular. Monitoreo de ácidos biliares cada 1-2 semanas. Considerar tratamiento sintomático para el prurito si es necesario. Control prenatal de rutina."
        );
    }

    #[test]
    fn test_bile_acid_boundaries() {
        assert_eq!(evaluate(scenario(100.0, 10.0, 30)).level, RiskLevel::High);
        assert_eq!(evaluate(scenario(99.999, 10.0, 30)).level, RiskLevel::Medium);
        assert_eq!(evaluate(scenario(40.0, 10.0, 30)).level, RiskLevel::Medium);
        assert_eq!(evaluate(scenario(39.999, 10.0, 30)).level, RiskLevel::Low);
    }

    #[test]
    fn test_strict_thresholds_do_not_trigger() {
        let pr_at_limit = ClinicalInput {
            pr_interval: PrInterval::Evaluated,
            pr_value: 150.0,
            ..scenario(5.0, 10.0, 30)
        };
        assert_eq!(evaluate(pr_at_limit).level, RiskLevel::Low);

        let bilirubin_at_limit = ClinicalInput {
            total_bilirubin: 1.2,
            ..scenario(5.0, 10.0, 30)
        };
        assert_eq!(evaluate(bilirubin_at_limit).level, RiskLevel::Low);

        let enzymes_at_limit = ClinicalInput {
            gpt: 40.0,
            ..scenario(5.0, 40.0, 30)
        };
        assert_eq!(evaluate(enzymes_at_limit).level, RiskLevel::Low);
    }

    #[test]
    fn test_term_gestation_is_medium() {
        let assessment = evaluate(scenario(5.0, 10.0, 37));
        assert_eq!(assessment.level, RiskLevel::Medium);
        assert_eq!(
            assessment.triggered_factors,
            vec!["Edad gestacional ≥ 37 semanas"]
        );
    }

    #[test]
    fn test_low_tier_gets_treatment_suffix() {
        let assessment = evaluate(scenario(15.0, 10.0, 30));
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.recommendation.ends_with(SUFFIX));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let input = scenario(50.0, 50.0, 38);
        assert_eq!(evaluate(input), evaluate(input));
    }

    #[test]
    fn test_assess_echoes_dead_inputs() {
        let form = CollectedForm {
            input: scenario(5.0, 10.0, 30),
            age: Some(34),
            gestational_days: Some(5),
        };
        let report = assess(&form);

        assert_eq!(report.assessment.level, RiskLevel::Low);
        assert_eq!(report.gestational_weeks, Some(30));
        assert_eq!(report.gestational_days, Some(5));
        assert_eq!(report.age, Some(34));
    }

    #[test]
    fn test_form_to_assessment() {
        let yaml = r#"
gestationalWeeks: "30"
bileAcids: "50"
totalBilirubin: "0.5"
got: "50"
gpt: "10"
prInterval: "no_evaluado"
meconium: "no"
earlyOnset: "no"
noTreatmentResponse: "no"
"#;
        let form = FormSubmission::from_yaml(yaml).unwrap().collect().unwrap();
        let report = assess(&form);

        assert_eq!(report.assessment.level, RiskLevel::Medium);
        assert_eq!(report.assessment.triggered_factors.len(), 2);
    }
}
