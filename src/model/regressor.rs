//! Linear-regression inference over an encoded feature vector.
//!
//! The model is a black box to the rest of the app. Two operations exist:
//!
//! - expose the trained feature schema (so the encoder can align to it)
//! - predict a score for one encoded row
//!
//! All artifact validation happens once, in [`Regressor::from_file`];
//! `predict` then only guards the per-call failure modes (shape mismatch,
//! non-finite output).

use nalgebra::DVector;

use crate::domain::{LinearModel, ModelFile};
use crate::error::AppError;

/// A validated, read-only regression model.
///
/// Built once at startup and shared by reference for the rest of the
/// process; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct Regressor {
    file: ModelFile,
    weights: DVector<f64>,
}

impl Regressor {
    /// Validate an artifact's model parameters and wrap them for inference.
    ///
    /// Rejected with exit code 3: empty schema, coefficient count differing
    /// from the schema length, non-finite coefficients or intercept.
    pub fn from_file(file: ModelFile) -> Result<Self, AppError> {
        let LinearModel {
            feature_names,
            coefficients,
            intercept,
        } = &file.model;

        if feature_names.is_empty() {
            return Err(AppError::data(
                "Model artifact has an empty feature schema.",
            ));
        }
        if coefficients.len() != feature_names.len() {
            return Err(AppError::data(format!(
                "Model artifact is inconsistent: {} feature names but {} coefficients.",
                feature_names.len(),
                coefficients.len()
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::data(
                "Model artifact contains non-finite parameters.",
            ));
        }

        let weights = DVector::from_row_slice(coefficients);
        Ok(Self { file, weights })
    }

    /// Ordered feature column names the model was trained on.
    pub fn schema(&self) -> &[String] {
        &self.file.model.feature_names
    }

    /// Artifact metadata (target description, training date, quality).
    pub fn meta(&self) -> &ModelFile {
        &self.file
    }

    /// Predict the score for a single encoded feature vector.
    ///
    /// The vector must have exactly one entry per schema column; anything
    /// else is a runtime error (exit 4), as is a non-finite result.
    pub fn predict(&self, features: &[f64]) -> Result<f64, AppError> {
        if features.len() != self.weights.len() {
            return Err(AppError::runtime(format!(
                "Feature vector has {} entries but the model schema has {} columns.",
                features.len(),
                self.weights.len()
            )));
        }

        let x = DVector::from_row_slice(features);
        let score = self.file.model.intercept + self.weights.dot(&x);
        if !score.is_finite() {
            return Err(AppError::runtime("Model produced a non-finite score."));
        }
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainQuality;
    use chrono::NaiveDate;

    fn small_file(feature_names: Vec<&str>, coefficients: Vec<f64>, intercept: f64) -> ModelFile {
        ModelFile {
            tool: "gradecast-train".to_string(),
            target: "nota média (0-300)".to_string(),
            trained_at: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            model: LinearModel {
                feature_names: feature_names.into_iter().map(String::from).collect(),
                coefficients,
                intercept,
            },
            quality: TrainQuality {
                r2: 0.2,
                rmse: 38.0,
                n: 1000,
            },
        }
    }

    #[test]
    fn predicts_intercept_plus_hot_coefficients() {
        let file = small_file(
            vec!["a_x", "a_y", "b_x", "b_y"],
            vec![10.0, -10.0, 3.0, -3.0],
            200.0,
        );
        let regressor = Regressor::from_file(file).unwrap();

        let score = regressor.predict(&[1.0, 0.0, 0.0, 1.0]).unwrap();
        assert!((score - 207.0).abs() < 1e-12);

        let score = regressor.predict(&[0.0, 1.0, 1.0, 0.0]).unwrap();
        assert!((score - 193.0).abs() < 1e-12);
    }

    #[test]
    fn prediction_is_deterministic() {
        let file = small_file(vec!["a", "b"], vec![1.5, -2.5], 100.0);
        let regressor = Regressor::from_file(file).unwrap();
        let features = [1.0, 1.0];
        assert_eq!(
            regressor.predict(&features).unwrap(),
            regressor.predict(&features).unwrap()
        );
    }

    #[test]
    fn schema_matches_artifact_order() {
        let file = small_file(vec!["z_1", "a_2"], vec![0.0, 0.0], 0.0);
        let regressor = Regressor::from_file(file).unwrap();
        assert_eq!(regressor.schema(), ["z_1".to_string(), "a_2".to_string()]);
    }

    #[test]
    fn rejects_coefficient_count_mismatch() {
        let file = small_file(vec!["a", "b", "c"], vec![1.0, 2.0], 0.0);
        let err = Regressor::from_file(file).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("3 feature names"));
    }

    #[test]
    fn rejects_empty_schema() {
        let file = small_file(vec![], vec![], 0.0);
        let err = Regressor::from_file(file).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_non_finite_parameters() {
        let file = small_file(vec!["a"], vec![f64::NAN], 0.0);
        assert_eq!(Regressor::from_file(file).unwrap_err().exit_code(), 3);

        let file = small_file(vec!["a"], vec![1.0], f64::INFINITY);
        assert_eq!(Regressor::from_file(file).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn wrong_length_vector_is_a_runtime_error() {
        let file = small_file(vec!["a", "b"], vec![1.0, 2.0], 0.0);
        let regressor = Regressor::from_file(file).unwrap();
        let err = regressor.predict(&[1.0]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
