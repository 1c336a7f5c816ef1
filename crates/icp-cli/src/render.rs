//! Result presentation.
//!
//! The text panel mirrors the assessment form's result card: a
//! severity-styled header, the triggered factors as bullets (omitted when
//! there are none) and the recommendation as prose.

use anyhow::Result;
use chrono::SecondsFormat;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use icp_core::{AssessmentReport, RiskLevel};

/// Output format for assessment reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Render a report in the requested format.
pub fn render(report: &AssessmentReport, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, color)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
    }
}

fn marker(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "✓",
        RiskLevel::Medium => "!",
        RiskLevel::High => "⚠",
    }
}

fn severity(text: &str, level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => text.green(),
        RiskLevel::Medium => text.yellow(),
        RiskLevel::High => text.red(),
    }
}

/// Render the result panel as plain or coloured text.
pub fn render_text(report: &AssessmentReport, color: bool) -> String {
    let assessment = &report.assessment;
    let level = assessment.level;
    let mut lines = Vec::new();

    let header = format!("{} Nivel de Riesgo: {}", marker(level), level.display_name());
    let heading = |text: &str| {
        if color {
            severity(text, level).bold().to_string()
        } else {
            text.to_string()
        }
    };

    lines.push(heading(header.as_str()));

    if !assessment.triggered_factors.is_empty() {
        lines.push(String::new());
        lines.push(heading("Factores de riesgo identificados:"));
        for factor in &assessment.triggered_factors {
            lines.push(format!("  • {}", factor));
        }
    }

    lines.push(String::new());
    lines.push(heading("Recomendaciones:"));
    lines.push(format!("  {}", assessment.recommendation));

    if let Some(weeks) = report.gestational_weeks {
        let days = report.gestational_days.unwrap_or(0);
        lines.push(String::new());
        lines.push(format!("Edad gestacional: {}+{} semanas", weeks, days));
    }

    lines.push(format!(
        "Evaluado: {}",
        report
            .evaluated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    lines.join("\n")
}
