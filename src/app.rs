//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging and resolves the model path
//! - loads the model once into a `PredictionService`
//! - dispatches to the line-mode commands or the TUI

use clap::Parser;

use crate::cli::{Command, PredictArgs, ProfileArgs};
use crate::config::Settings;
use crate::domain::{Profile, ProfileInput};
use crate::error::AppError;
use crate::service::PredictionService;

pub mod pipeline;

const SUBCOMMANDS: [&str; 5] = ["predict", "breakdown", "inspect", "tui", "about"];

/// Entry point for the `medinsure` binary.
pub fn run() -> Result<(), AppError> {
    // `medinsure` and `medinsure --model X` should behave like `medinsure tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let interactive = matches!(cli.command, Command::Tui);
    crate::logging::init_logger(cli.verbose, cli.log_file.as_deref(), interactive)?;

    let settings = Settings::from_env(cli.model.as_deref());
    tracing::debug!(model_path = %settings.model_path.display(), "resolved settings");

    match cli.command {
        Command::Predict(args) => handle_predict(&settings, args),
        Command::Breakdown(args) => handle_breakdown(&args),
        Command::Inspect => handle_inspect(&settings),
        Command::Tui => crate::tui::run(PredictionService::load(&settings.model_path)),
        Command::About => {
            print!("{}", crate::report::format_about());
            Ok(())
        }
    }
}

fn handle_predict(settings: &Settings, args: PredictArgs) -> Result<(), AppError> {
    // Validate before touching the model so bad input is reported as such even
    // when the artifact is missing too.
    let profile = profile_from_args(&args.profile)?;
    let service = PredictionService::load(&settings.model_path);

    let estimate = pipeline::run_estimate(&service, &profile, args.breakdown)?;

    if args.json {
        let json = serde_json::to_string_pretty(&estimate)
            .map_err(|e| AppError::new(1, format!("Failed to encode estimate: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_estimate(&estimate));
    }

    if let Some(path) = &args.export {
        let model_name = service.model_info().map(|i| i.name).unwrap_or_default();
        crate::io::export::write_estimate_json(path, &estimate, &model_name)?;
        tracing::info!(path = %path.display(), "estimate exported");
    }

    Ok(())
}

fn handle_breakdown(args: &ProfileArgs) -> Result<(), AppError> {
    let profile = profile_from_args(args)?;
    let breakdown = crate::breakdown::illustrative_breakdown(&profile);
    println!("{}", crate::report::format_breakdown(&breakdown));
    Ok(())
}

fn handle_inspect(settings: &Settings) -> Result<(), AppError> {
    let service = PredictionService::load(&settings.model_path);
    let info = service.model_info()?;
    println!("Artifact: {}", settings.model_path.display());
    println!("{}", crate::report::format_model_info(&info));
    Ok(())
}

/// Merge `--profile` file and field flags into a validated profile.
pub fn profile_from_args(args: &ProfileArgs) -> Result<Profile, AppError> {
    let base = match &args.profile {
        Some(path) => crate::io::profile::read_profile_json(path)?,
        None => ProfileInput::default(),
    };
    base.override_with(args.flag_values())
        .into_profile()
        .map_err(AppError::from)
}

/// Rewrite argv so `medinsure` defaults to `medinsure tui`.
///
/// Rules:
/// - `medinsure`                 -> `medinsure tui`
/// - `medinsure --model X`       -> `medinsure tui --model X`
/// - `medinsure --help/--version` -> unchanged
/// - any argv naming a subcommand -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if argv.iter().skip(1).any(|a| SUBCOMMANDS.contains(&a.as_str())) {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}
