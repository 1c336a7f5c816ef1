//! Evaluator: walks the rule tables and resolves the risk tier.
//!
//! Two passes, strict precedence:
//! 1. Every high-tier rule is checked; any that fires makes the case HIGH
//! 2. Only if none fired, every medium-tier rule is checked; any that fires
//!    makes the case MEDIUM
//! 3. Otherwise the case is LOW
//!
//! All rules within a pass are checked, so every applicable factor is
//! reported, not just the first.

use tracing::debug;

use crate::recommendations;
use crate::rules::{RiskRule, HIGH_TIER_RULES, MEDIUM_TIER_RULES};
use crate::types::{
    ClinicalInput, Evaluation, RiskAssessment, RiskLevel, RuleEvaluation, RuleResult,
};

/// The evaluator holds no state; every call is independent.
pub struct RiskEvaluator;

impl RiskEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Classify an input and keep the per-rule trace.
    pub fn evaluate(&self, input: &ClinicalInput) -> Evaluation {
        let mut rules_evaluated =
            Vec::with_capacity(HIGH_TIER_RULES.len() + MEDIUM_TIER_RULES.len());
        let mut triggered_factors = Vec::new();
        let mut level = RiskLevel::Low;

        // Pass 1 (high tier)
        if self.run_pass(
            &HIGH_TIER_RULES,
            input,
            &mut rules_evaluated,
            &mut triggered_factors,
        ) {
            level = RiskLevel::High;
        }

        // Pass 2 (medium tier), skipped once the case is high
        if level == RiskLevel::High {
            rules_evaluated.extend(MEDIUM_TIER_RULES.iter().map(RiskRule::skipped));
        } else if self.run_pass(
            &MEDIUM_TIER_RULES,
            input,
            &mut rules_evaluated,
            &mut triggered_factors,
        ) {
            level = RiskLevel::Medium;
        }

        debug!(
            level = %level,
            factors = triggered_factors.len(),
            bile_acids = input.bile_acids,
            "Risk level resolved"
        );

        Evaluation {
            assessment: RiskAssessment {
                level,
                triggered_factors,
                recommendation: recommendations::compose(level, input.bile_acids),
            },
            rules_evaluated,
        }
    }

    /// Check every rule of one pass. Returns true if any fired.
    fn run_pass(
        &self,
        rules: &[RiskRule],
        input: &ClinicalInput,
        rules_evaluated: &mut Vec<RuleEvaluation>,
        triggered_factors: &mut Vec<String>,
    ) -> bool {
        let mut any_fired = false;

        for rule in rules {
            let evaluation = rule.evaluate(input);
            if evaluation.result == RuleResult::Fired {
                debug!(rule_id = rule.id, tier = %rule.tier, "Rule fired");
                triggered_factors.push(rule.label.to_string());
                any_fired = true;
            }
            rules_evaluated.push(evaluation);
        }

        any_fired
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
