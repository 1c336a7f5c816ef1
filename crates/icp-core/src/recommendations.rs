//! Recommendation text per risk tier.
//!
//! The sentences are fixed clinical strings and must match byte for byte.

use crate::thresholds::BILE_ACIDS_TREATMENT;
use crate::types::RiskLevel;

const LOW_RISK: &[&str] = &[
    "Seguimiento regular",
    "Monitoreo de ácidos biliares cada 1-2 semanas",
    "Considerar tratamiento sintomático para el prurito si es necesario",
    "Control prenatal de rutina",
];

const MEDIUM_RISK: &[&str] = &[
    "Monitoreo semanal de ácidos biliares y enzimas hepáticas",
    "Iniciar tratamiento con ácido ursodeoxicólico",
    "Considerar inducción del parto a las 37-38 semanas",
    "Monitoreo fetal más frecuente",
];

const HIGH_RISK: &[&str] = &[
    "Monitoreo intensivo de ácidos biliares y función hepática (2-3 veces por semana)",
    "Tratamiento con ácido ursodeoxicólico en dosis altas",
    "Planear el parto entre las 34-36 semanas según severidad",
    "Considerar corticosteroides para maduración pulmonar si <34 semanas",
    "Monitoreo fetal diario",
];

/// Appended at any tier when bile acids exceed the treatment threshold.
pub const TREATMENT_SUGGESTION: &str = " Se sugiere tratamiento con ácido ursodesoxicólico.";

/// Sentences for a tier, in display order.
pub fn base_recommendations(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Low => LOW_RISK,
        RiskLevel::Medium => MEDIUM_RISK,
        RiskLevel::High => HIGH_RISK,
    }
}

/// Compose the recommendation paragraph for a tier.
///
/// The treatment suggestion is appended whenever `bile_acids` exceeds the
/// treatment threshold, independent of tier, even though the medium and
/// high texts already mention ursodeoxycholic acid.
pub fn compose(level: RiskLevel, bile_acids: f64) -> String {
    let mut text = base_recommendations(level).join(". ");
    text.push('.');

    if bile_acids > BILE_ACIDS_TREATMENT {
        text.push_str(TREATMENT_SUGGESTION);
    }

    text
}
