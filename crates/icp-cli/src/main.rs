//! `icp-risk`: command-line risk assessment for intrahepatic cholestasis of
//! pregnancy.

mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use icp_core::{
    assess, AssessmentReport, ClinicalInput, CollectedForm, FormSubmission, PrInterval,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use render::OutputFormat;

#[derive(Parser)]
#[command(name = "icp-risk", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log filter (overrides RUST_LOG), e.g. "debug" or "icp_core=debug"
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a form submission file (YAML or JSON, "-" for stdin)
    Evaluate {
        /// Path to the submission
        path: PathBuf,
    },
    /// Evaluate values given as flags
    Assess(AssessArgs),
    /// Check a submission file without evaluating it
    Validate {
        /// Path to the submission
        path: PathBuf,
    },
}

#[derive(Args)]
#[command(allow_negative_numbers = true)]
struct AssessArgs {
    /// Serum bile acids (μmol/L)
    #[arg(long)]
    bile_acids: f64,

    /// GOT (U/L)
    #[arg(long)]
    got: f64,

    /// GPT (U/L)
    #[arg(long)]
    gpt: f64,

    /// Total bilirubin (mg/dL)
    #[arg(long)]
    total_bilirubin: f64,

    /// Completed gestational weeks
    #[arg(long)]
    gestational_weeks: i32,

    /// Extra gestational days (shown only)
    #[arg(long)]
    gestational_days: Option<i32>,

    /// Patient age (shown only)
    #[arg(long)]
    age: Option<i32>,

    /// PR interval (ms); marks the interval as evaluated
    #[arg(long)]
    pr_value: Option<f64>,

    /// Meconium present
    #[arg(long)]
    meconium: bool,

    /// Onset before 30 weeks
    #[arg(long)]
    early_onset: bool,

    /// No response to treatment
    #[arg(long)]
    no_treatment_response: bool,
}

impl AssessArgs {
    fn to_form(&self) -> CollectedForm {
        let pr_interval = if self.pr_value.is_some() {
            PrInterval::Evaluated
        } else {
            PrInterval::NotEvaluated
        };

        CollectedForm {
            input: ClinicalInput {
                bile_acids: self.bile_acids,
                got: self.got,
                gpt: self.gpt,
                total_bilirubin: self.total_bilirubin,
                pr_interval,
                pr_value: self.pr_value.unwrap_or(0.0),
                meconium: self.meconium,
                early_onset: self.early_onset,
                no_treatment_response: self.no_treatment_response,
                gestational_weeks: self.gestational_weeks,
            },
            age: self.age,
            gestational_days: self.gestational_days,
        }
    }
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read a submission from a file, or from stdin for "-".
fn read_submission(path: &Path) -> Result<FormSubmission> {
    if path.as_os_str() == "-" {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("reading submission from stdin")?;
        // JSON is valid YAML, so one parser covers both
        return FormSubmission::from_yaml(&contents).context("parsing submission from stdin");
    }

    FormSubmission::from_file(path)
        .with_context(|| format!("loading submission {}", path.display()))
}

fn collect(path: &Path) -> Result<CollectedForm> {
    let submission = read_submission(path)?;
    submission
        .collect()
        .with_context(|| format!("coercing submission {}", path.display()))
}

fn print_report(report: &AssessmentReport, cli: &Cli) -> Result<()> {
    let output = render::render(report, cli.format, !cli.no_color)?;
    println!("{}", output);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Evaluate { path } => {
            let form = collect(path)?;
            debug!(input = ?form.input, "Submission collected");

            let report = assess(&form);
            info!(level = %report.assessment.level, "Assessment complete");
            print_report(&report, &cli)?;
        }
        Commands::Assess(args) => {
            let form = args.to_form();

            let report = assess(&form);
            info!(level = %report.assessment.level, "Assessment complete");
            print_report(&report, &cli)?;
        }
        Commands::Validate { path } => match collect(path) {
            Ok(_) => println!("OK"),
            Err(e) => {
                eprintln!("Invalid submission: {:#}", e);
                bail!("validation failed for {}", path.display());
            }
        },
    }

    Ok(())
}
