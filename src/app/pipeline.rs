//! Shared "prediction pipeline" logic used by both front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! artifact read -> parameter validation -> encoding plan -> (encode -> predict)
//!
//! The form TUI and the schema report can then focus on presentation
//! (widgets vs text).

use std::path::Path;

use crate::encode::EncoderPlan;
use crate::error::AppError;
use crate::io::read_model_json;
use crate::model::Regressor;
use crate::domain::StudentProfile;

/// The process-wide model state: loaded and validated once at startup, then
/// shared read-only by every prediction call.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    pub regressor: Regressor,
    pub plan: EncoderPlan,
}

/// All computed outputs of a single form submission.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub profile: StudentProfile,
    pub score: f64,
}

/// Load and validate the model artifact, then build the encoding plan
/// against its schema.
///
/// Every startup failure mode surfaces here, before any UI exists: a
/// missing/malformed file (exit 2), invalid model parameters (exit 3), or a
/// schema that cannot be encoded against (exit 3).
pub fn load(model_path: &Path) -> Result<ModelHandle, AppError> {
    let file = read_model_json(model_path)?;
    let regressor = Regressor::from_file(file)?;
    let plan = EncoderPlan::build(regressor.schema())?;
    Ok(ModelHandle { regressor, plan })
}

/// Run one submit cycle: encode the profile and predict the score.
///
/// The encoded vector is created fresh per call and dropped on return;
/// there is no caching and no retry. The flow is deterministic in
/// `(handle, profile)`.
pub fn run_predict(handle: &ModelHandle, profile: &StudentProfile) -> Result<RunOutput, AppError> {
    let features = handle.plan.encode(profile);
    let score = handle.regressor.predict(&features)?;
    Ok(RunOutput {
        profile: *profile,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        EthnicGroup, Gender, LinearModel, LunchType, ModelFile, ParentalEducation,
        StudentProfile, TestPrep, TrainQuality,
    };
    use crate::io::write_model_json;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gradecast_{tag}_{}.json", std::process::id()))
    }

    fn bundled_artifact_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::domain::DEFAULT_MODEL_PATH)
    }

    /// Artifact matching the bundled one's shape, with easy-to-check
    /// parameters: every coefficient is zero except the five the example
    /// profile sets.
    fn test_artifact() -> ModelFile {
        let feature_names: Vec<String> = vec![
            "gender_female",
            "gender_male",
            "race/ethnicity_group A",
            "race/ethnicity_group B",
            "race/ethnicity_group C",
            "race/ethnicity_group D",
            "race/ethnicity_group E",
            "parental level of education_associate's degree",
            "parental level of education_bachelor's degree",
            "parental level of education_high school",
            "parental level of education_master's degree",
            "parental level of education_some college",
            "parental level of education_some high school",
            "lunch_free/reduced",
            "lunch_standard",
            "test preparation course_completed",
            "test preparation course_none",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let mut coefficients = vec![0.0; feature_names.len()];
        let coef_of = |name: &str, coefficients: &mut [f64], value: f64| {
            let idx = feature_names.iter().position(|n| n == name).unwrap();
            coefficients[idx] = value;
        };
        coef_of("gender_female", &mut coefficients, 4.0);
        coef_of("race/ethnicity_group B", &mut coefficients, -6.0);
        coef_of(
            "parental level of education_bachelor's degree",
            &mut coefficients,
            6.0,
        );
        coef_of("lunch_standard", &mut coefficients, 13.0);
        coef_of("test preparation course_completed", &mut coefficients, 11.0);

        ModelFile {
            tool: "gradecast-train".to_string(),
            target: "nota média (0-300)".to_string(),
            trained_at: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            model: LinearModel {
                feature_names,
                coefficients,
                intercept: 200.0,
            },
            quality: TrainQuality {
                r2: 0.214,
                rmse: 38.27,
                n: 1000,
            },
        }
    }

    fn example_profile() -> StudentProfile {
        StudentProfile {
            gender: Gender::Female,
            ethnic_group: EthnicGroup::GroupB,
            parental_education: ParentalEducation::BachelorsDegree,
            lunch_type: LunchType::Standard,
            test_prep: TestPrep::Completed,
        }
    }

    #[test]
    fn loads_artifact_and_predicts_end_to_end() {
        let path = temp_path("pipeline_end_to_end");
        write_model_json(&path, &test_artifact()).unwrap();

        let handle = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(handle.plan.drift().is_clean());
        assert_eq!(handle.plan.len(), 17);

        // 200 + 4 - 6 + 6 + 13 + 11
        let run = run_predict(&handle, &example_profile()).unwrap();
        assert!((run.score - 228.0).abs() < 1e-9);
        assert_eq!(run.profile, example_profile());
    }

    #[test]
    fn bundled_artifact_matches_the_form_and_scores_the_example() {
        let handle = load(&bundled_artifact_path()).unwrap();

        assert!(handle.plan.drift().is_clean());
        assert_eq!(handle.plan.len(), 17);

        // Exactly one column per field lights up.
        let features = handle.plan.encode(&example_profile());
        let hot: Vec<&str> = features
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1.0)
            .map(|(i, _)| handle.regressor.schema()[i].as_str())
            .collect();
        assert_eq!(
            hot,
            vec![
                "gender_female",
                "race/ethnicity_group B",
                "parental level of education_bachelor's degree",
                "lunch_standard",
                "test preparation course_completed",
            ]
        );

        // 203.98 + 4.6 - 5.8 + 6.2 + 13.1 + 11.5
        let run = run_predict(&handle, &example_profile()).unwrap();
        assert!((run.score - 233.58).abs() < 1e-9);
        assert_eq!(
            crate::report::format_success_line(run.score),
            "Nota média prevista: 233.58"
        );
    }

    #[test]
    fn bundled_artifact_without_a_column_zero_fills_that_field() {
        let mut artifact = read_model_json(&bundled_artifact_path()).unwrap();
        let idx = artifact
            .model
            .feature_names
            .iter()
            .position(|n| n == "lunch_standard")
            .unwrap();
        artifact.model.feature_names.remove(idx);
        artifact.model.coefficients.remove(idx);

        let path = temp_path("pipeline_zero_fill");
        write_model_json(&path, &artifact).unwrap();
        let handle = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(handle.plan.drift().missing_columns, vec!["lunch_standard"]);

        // The lunch selection contributes nothing: 233.58 - 13.1.
        let run = run_predict(&handle, &example_profile()).unwrap();
        assert!((run.score - 220.48).abs() < 1e-9);
    }

    #[test]
    fn prediction_depends_only_on_selected_values() {
        let path = temp_path("pipeline_determinism");
        write_model_json(&path, &test_artifact()).unwrap();
        let handle = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let direct = example_profile();
        let mut cycled = StudentProfile::default();
        cycled.cycle(crate::domain::FieldKind::EthnicGroup, 1);
        cycled.cycle(crate::domain::FieldKind::ParentalEducation, 4);
        cycled.cycle(crate::domain::FieldKind::TestPrep, 1);

        assert_eq!(cycled, direct);
        assert_eq!(
            run_predict(&handle, &cycled).unwrap().score,
            run_predict(&handle, &direct).unwrap().score
        );
    }

    #[test]
    fn missing_artifact_fails_startup_with_exit_2() {
        let err = load(&temp_path("pipeline_missing_nonexistent")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn inconsistent_artifact_fails_startup_with_exit_3() {
        let mut artifact = test_artifact();
        artifact.model.coefficients.pop();

        let path = temp_path("pipeline_bad_artifact");
        write_model_json(&path, &artifact).unwrap();
        let err = load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unknown_schema_columns_load_with_drift() {
        let mut artifact = test_artifact();
        artifact
            .model
            .feature_names
            .push("race/ethnicity_group F".to_string());
        artifact.model.coefficients.push(99.0);

        let path = temp_path("pipeline_drift");
        write_model_json(&path, &artifact).unwrap();
        let handle = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            handle.plan.drift().unclaimed_columns,
            vec!["race/ethnicity_group F"]
        );

        // The unclaimed coefficient never contributes to a score.
        let run = run_predict(&handle, &example_profile()).unwrap();
        assert!((run.score - 228.0).abs() < 1e-9);
    }
}
