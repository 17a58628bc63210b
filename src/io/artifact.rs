//! Read/write model artifact JSON.
//!
//! The artifact is the portable representation of a trained model:
//! - the ordered one-hot feature schema
//! - linear coefficients + intercept
//! - training metadata (tool, target, date, quality)
//!
//! The schema is defined by `domain::ModelFile`. Reading happens exactly
//! once per process, at startup, before any UI is set up; a missing or
//! malformed artifact is a fatal usage error (exit 2).

use std::fs::File;
use std::path::Path;

use crate::domain::ModelFile;
use crate::error::AppError;

/// Read a model artifact JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to open model artifact '{}': {e}",
            path.display()
        ))
    })?;
    let model: ModelFile = serde_json::from_reader(file).map_err(|e| {
        AppError::usage(format!(
            "Invalid model artifact '{}': {e}",
            path.display()
        ))
    })?;
    Ok(model)
}

/// Write a model artifact JSON file (pretty-printed, like the bundled one).
pub fn write_model_json(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create model artifact '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::usage(format!("Failed to write model artifact: {e}")))?;
    Ok(())
}
