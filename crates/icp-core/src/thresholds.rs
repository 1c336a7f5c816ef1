//! Clinical cut-off values used by the risk rules.
//!
//! Based on the RCOG and FLASOG guidance for intrahepatic cholestasis of
//! pregnancy.

/// Bile acids (μmol/L) at or above which the case is high risk.
pub const BILE_ACIDS_HIGH: f64 = 100.0;

/// Bile acids (μmol/L) at or above which the case is at least medium risk.
pub const BILE_ACIDS_MEDIUM: f64 = 40.0;

/// Bile acids (μmol/L) above which ursodeoxycholic acid is suggested.
pub const BILE_ACIDS_TREATMENT: f64 = 10.0;

/// GOT (U/L) upper limit.
pub const GOT_LIMIT: f64 = 40.0;

/// GPT (U/L) upper limit.
pub const GPT_LIMIT: f64 = 40.0;

/// Total bilirubin (mg/dL) upper limit.
pub const BILIRUBIN_LIMIT: f64 = 1.2;

/// PR interval (ms) upper limit.
pub const PR_INTERVAL_LIMIT: f64 = 150.0;

/// Onset before this many weeks counts as early.
pub const EARLY_ONSET_WEEKS: i32 = 30;

/// Gestational age (weeks) considered term.
pub const TERM_WEEKS: i32 = 37;
