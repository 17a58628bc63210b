//! Command-line parsing for the score-prediction form.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the encoding/inference code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gradecast",
    version,
    about = "Previsão de Rendimento Escolar (terminal form)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive prediction form (the default command).
    ///
    /// The form is the only way to submit a profile for prediction; the
    /// other commands just re-render or inspect files.
    Form(FormArgs),
    /// Re-render a saved prediction JSON as a text report plus bar chart.
    Show(ShowArgs),
    /// Print the model's feature schema, the form-to-column mapping, and
    /// any drift between them.
    Schema(SchemaArgs),
}

/// Options for the interactive form.
#[derive(Debug, Parser, Clone)]
pub struct FormArgs {
    /// Path to the model artifact JSON. Falls back to $GRADECAST_MODEL
    /// (honoring `.env`), then to the bundled artifact.
    #[arg(short = 'm', long)]
    pub model: Option<PathBuf>,

    /// Where the form's save key writes the last prediction.
    #[arg(long, default_value = "previsao.json")]
    pub export: PathBuf,
}

/// Options for re-rendering a saved prediction.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Prediction JSON produced by the form's save key.
    #[arg(long, value_name = "JSON")]
    pub result: PathBuf,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,
}

/// Options for inspecting a model artifact.
#[derive(Debug, Parser)]
pub struct SchemaArgs {
    /// Path to the model artifact JSON. Falls back to $GRADECAST_MODEL
    /// (honoring `.env`), then to the bundled artifact.
    #[arg(short = 'm', long)]
    pub model: Option<PathBuf>,
}
