//! Command-line parsing for the insurance cost estimator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! prediction code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ProfileInput, Region, Sex, Smoker};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "medinsure", version, about = "Medical insurance cost estimator")]
pub struct Cli {
    /// Model artifact (JSON). Defaults to $MEDINSURE_MODEL, then models/insurance_gbt.json.
    #[arg(long, global = true, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Log debug details.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append logs to this file (the only log sink in TUI mode).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the annual cost for one profile.
    Predict(PredictArgs),
    /// Print the illustrative cost-factor breakdown (no model involved).
    Breakdown(ProfileArgs),
    /// Load the model artifact and describe it.
    Inspect,
    /// Launch the interactive form.
    Tui,
    /// Explain how the estimate is produced, with cost-reduction tips.
    About,
}

/// The six profile attributes, each optional so a `--profile` file can supply them.
#[derive(Debug, Args, Clone, Default)]
pub struct ProfileArgs {
    /// Profile JSON file; flags below override its fields.
    #[arg(long, value_name = "JSON")]
    pub profile: Option<PathBuf>,

    /// Age in years (18-100).
    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<i64>,

    #[arg(long, value_enum)]
    pub sex: Option<Sex>,

    /// Body mass index (15.0-40.0).
    #[arg(long)]
    pub bmi: Option<f64>,

    /// Number of dependents (0-5).
    #[arg(long, visible_alias = "children", allow_negative_numbers = true)]
    pub dependents: Option<i64>,

    #[arg(long, value_enum)]
    pub smoker: Option<Smoker>,

    #[arg(long, value_enum)]
    pub region: Option<Region>,
}

impl ProfileArgs {
    /// Field flags as a partial profile.
    pub fn flag_values(&self) -> ProfileInput {
        ProfileInput {
            age: self.age,
            sex: self.sex.map(|v| v.as_str().to_string()),
            bmi: self.bmi,
            dependents: self.dependents,
            smoker: self.smoker.map(|v| v.as_str().to_string()),
            region: self.region.map(|v| v.as_str().to_string()),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Also print the illustrative cost-factor breakdown.
    #[arg(long)]
    pub breakdown: bool,

    /// Print the estimate as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write the estimate to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}
