//! Read/write saved prediction JSON.
//!
//! A saved prediction carries everything `gradecast show` needs to
//! re-render a submission later: the full profile (with dataset column
//! names as keys), the predicted score, and the reference it was compared
//! against.

use std::fs::File;
use std::path::Path;

use crate::domain::PredictionFile;
use crate::error::AppError;

/// Write a prediction JSON file.
pub fn write_prediction_json(path: &Path, prediction: &PredictionFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create prediction JSON '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, prediction)
        .map_err(|e| AppError::usage(format!("Failed to write prediction JSON: {e}")))?;
    Ok(())
}

/// Read a prediction JSON file.
pub fn read_prediction_json(path: &Path) -> Result<PredictionFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to open prediction JSON '{}': {e}",
            path.display()
        ))
    })?;
    let prediction: PredictionFile = serde_json::from_reader(file).map_err(|e| {
        AppError::usage(format!(
            "Invalid prediction JSON '{}': {e}",
            path.display()
        ))
    })?;
    Ok(prediction)
}
