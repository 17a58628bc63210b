//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves and loads the model artifact (fail fast, before any UI)
//! - dispatches to the interactive form or to the text renderers

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, FormArgs, SchemaArgs, ShowArgs};
use crate::domain::{DEFAULT_MODEL_PATH, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gradecast` binary.
pub fn run() -> Result<(), AppError> {
    // We want `gradecast` and `gradecast -m model.json` to behave like
    // `gradecast form ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Form(args) => handle_form(args),
        Command::Show(args) => handle_show(args),
        Command::Schema(args) => handle_schema(args),
    }
}

fn handle_form(args: FormArgs) -> Result<(), AppError> {
    let config = RunConfig {
        model_path: resolve_model_path(args.model),
        export_path: args.export,
    };

    // Load and validate before the terminal goes into raw mode: a bad
    // artifact must produce exactly one fatal report and no partial UI.
    let handle = pipeline::load(&config.model_path)?;

    let drift = handle.plan.drift();
    if !drift.is_clean() {
        eprint!("{}", crate::report::format_drift(drift));
    }

    crate::tui::run(config, handle)
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let prediction = crate::io::read_prediction_json(&args.result)?;

    println!("{}", crate::report::format_prediction_report(&prediction));
    println!(
        "{}",
        crate::plot::render_ascii_bars(
            prediction.score,
            prediction.reference,
            args.width,
            args.height
        )
    );
    Ok(())
}

fn handle_schema(args: SchemaArgs) -> Result<(), AppError> {
    let model_path = resolve_model_path(args.model);
    let handle = pipeline::load(&model_path)?;

    print!(
        "{}",
        crate::report::format_schema_report(&model_path, &handle.regressor, &handle.plan)
    );
    Ok(())
}

/// Resolve the artifact path: explicit flag, then `GRADECAST_MODEL` from the
/// environment (a `.env` file is honored), then the bundled default.
fn resolve_model_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }

    dotenvy::dotenv().ok();
    match std::env::var("GRADECAST_MODEL") {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_MODEL_PATH),
    }
}

/// Rewrite argv so `gradecast` defaults to `gradecast form`.
///
/// Rules:
/// - `gradecast`                      -> `gradecast form`
/// - `gradecast -m model.json ...`    -> `gradecast form -m model.json ...`
/// - `gradecast --help/--version/-h`  -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("form".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "form" | "show" | "schema");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "form flags".
    if arg1.starts_with('-') {
        argv.insert(1, "form".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
