//! One-hot encoding plan.
//!
//! The trained model expects a fixed, ordered list of `<column>_<value>`
//! feature columns. Instead of synthesizing those names on every submission
//! and comparing strings, the (field, value) → schema-index resolution
//! happens once, when the artifact is loaded:
//!
//! - encoding a profile afterwards is pure array indexing
//! - any mismatch between the form's domains and the schema is visible at
//!   startup (`SchemaDrift`) instead of silently producing zero vectors at
//!   request time
//!
//! Drift is deliberately a warning, not an error: a selected value without
//! a schema column encodes as all zeros for that field, which is how the
//! original flow behaved.

use std::collections::HashMap;

use crate::domain::{FieldKind, StudentProfile};
use crate::error::AppError;

/// Synthesize the one-hot column name for a field/value pair.
///
/// Training used the `<dataset column>_<value label>` convention, e.g.
/// `race/ethnicity_group B`.
pub fn one_hot_column(field: FieldKind, label: &str) -> String {
    format!("{}_{}", field.column_name(), label)
}

/// Mismatches between the form's domains and the trained schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaDrift {
    /// Synthesized `<column>_<value>` names with no schema column. Selecting
    /// such a value leaves its field's block all zeros.
    pub missing_columns: Vec<String>,
    /// Schema columns no form value can ever set; they stay 0 in every
    /// encoded vector.
    pub unclaimed_columns: Vec<String>,
}

impl SchemaDrift {
    pub fn is_clean(&self) -> bool {
        self.missing_columns.is_empty() && self.unclaimed_columns.is_empty()
    }
}

/// Resolved encoding plan for one trained schema.
///
/// `slots[field.index()][value ordinal]` holds the schema index the pair
/// maps to, or `None` when the schema has no such column.
#[derive(Debug, Clone)]
pub struct EncoderPlan {
    columns: Vec<String>,
    slots: Vec<Vec<Option<usize>>>,
    drift: SchemaDrift,
}

impl EncoderPlan {
    /// Resolve every (field, value) pair against `schema`.
    ///
    /// Fails only on schemas that cannot be encoded against at all: an empty
    /// column list or duplicate column names (which would make the mapping
    /// ambiguous). Missing or unclaimed columns are recorded as drift.
    pub fn build(schema: &[String]) -> Result<EncoderPlan, AppError> {
        if schema.is_empty() {
            return Err(AppError::data("Model schema has no feature columns."));
        }

        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(schema.len());
        for (idx, name) in schema.iter().enumerate() {
            if by_name.insert(name.as_str(), idx).is_some() {
                return Err(AppError::data(format!(
                    "Duplicate feature column in model schema: '{name}'"
                )));
            }
        }

        let mut slots = Vec::with_capacity(FieldKind::ALL.len());
        let mut drift = SchemaDrift::default();
        let mut claimed = vec![false; schema.len()];

        for field in FieldKind::ALL {
            let mut field_slots = Vec::with_capacity(field.domain().len());
            for label in field.domain() {
                let name = one_hot_column(field, label);
                match by_name.get(name.as_str()) {
                    Some(&idx) => {
                        claimed[idx] = true;
                        field_slots.push(Some(idx));
                    }
                    None => {
                        drift.missing_columns.push(name);
                        field_slots.push(None);
                    }
                }
            }
            slots.push(field_slots);
        }

        for (idx, was_claimed) in claimed.iter().enumerate() {
            if !was_claimed {
                drift.unclaimed_columns.push(schema[idx].clone());
            }
        }

        Ok(EncoderPlan {
            columns: schema.to_vec(),
            slots,
            drift,
        })
    }

    /// Encode one profile into the model's feature order.
    ///
    /// Always returns exactly `len()` entries, each `0.0` or `1.0`. Fields
    /// whose selected value has no schema column contribute nothing; this
    /// never fails.
    pub fn encode(&self, profile: &StudentProfile) -> Vec<f64> {
        let mut features = vec![0.0; self.columns.len()];
        for field in FieldKind::ALL {
            if let Some(idx) = self.slots[field.index()][profile.ordinal(field)] {
                features[idx] = 1.0;
            }
        }
        features
    }

    /// Ordered schema column names this plan encodes into.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn drift(&self) -> &SchemaDrift {
        &self.drift
    }

    /// The (field, value) pair a schema column is set by, if any. Used by
    /// the schema report.
    pub fn resolve(&self, column_idx: usize) -> Option<(FieldKind, &'static str)> {
        for field in FieldKind::ALL {
            for (ordinal, slot) in self.slots[field.index()].iter().enumerate() {
                if *slot == Some(column_idx) {
                    return Some((field, field.domain()[ordinal]));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EthnicGroup, Gender, LunchType, ParentalEducation, TestPrep};

    /// The 17 columns of the bundled artifact, written out literally to pin
    /// the naming convention (dataset column, underscore, value label) and
    /// the training order (fields in dataset order, values alphabetical).
    fn full_schema() -> Vec<String> {
        [
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
        .iter()
        .map(|s| s.to_string())
        .collect()
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
    fn full_schema_is_clean_and_fully_mapped() {
        let schema = full_schema();
        let plan = EncoderPlan::build(&schema).unwrap();

        assert_eq!(plan.len(), 17);
        assert!(plan.drift().is_clean());
        for idx in 0..plan.len() {
            assert!(plan.resolve(idx).is_some(), "column {idx} unmapped");
        }
    }

    #[test]
    fn encodes_known_profile_to_expected_columns() {
        let schema = full_schema();
        let plan = EncoderPlan::build(&schema).unwrap();

        let features = plan.encode(&example_profile());
        assert_eq!(features.len(), 17);

        let hot: Vec<&str> = features
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1.0)
            .map(|(i, _)| schema[i].as_str())
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
    }

    #[test]
    fn every_combination_sets_exactly_one_column_per_field() {
        let schema = full_schema();
        let plan = EncoderPlan::build(&schema).unwrap();

        for g in Gender::ALL {
            for e in EthnicGroup::ALL {
                for p in ParentalEducation::ALL {
                    for l in LunchType::ALL {
                        for t in TestPrep::ALL {
                            let profile = StudentProfile {
                                gender: g,
                                ethnic_group: e,
                                parental_education: p,
                                lunch_type: l,
                                test_prep: t,
                            };
                            let features = plan.encode(&profile);
                            let ones =
                                features.iter().filter(|v| **v == 1.0).count();
                            let zeros =
                                features.iter().filter(|v| **v == 0.0).count();
                            assert_eq!(ones, 5, "profile {profile:?}");
                            assert_eq!(ones + zeros, 17);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let plan = EncoderPlan::build(&full_schema()).unwrap();
        let profile = example_profile();
        assert_eq!(plan.encode(&profile), plan.encode(&profile));
    }

    #[test]
    fn encoding_ignores_how_the_profile_was_assembled() {
        let plan = EncoderPlan::build(&full_schema()).unwrap();

        // Same selections reached by cycling backwards through the wraps.
        let mut cycled = StudentProfile::default();
        cycled.cycle(FieldKind::TestPrep, -1);
        cycled.cycle(FieldKind::LunchType, 2);
        cycled.cycle(FieldKind::ParentalEducation, -2);
        cycled.cycle(FieldKind::EthnicGroup, -4);

        let direct = example_profile();
        assert_eq!(cycled, direct);
        assert_eq!(plan.encode(&cycled), plan.encode(&direct));
    }

    #[test]
    fn missing_schema_column_encodes_field_as_zeros() {
        // Drop `lunch_standard` from the schema.
        let schema: Vec<String> = full_schema()
            .into_iter()
            .filter(|c| c != "lunch_standard")
            .collect();
        let plan = EncoderPlan::build(&schema).unwrap();

        assert_eq!(plan.drift().missing_columns, vec!["lunch_standard"]);
        assert!(plan.drift().unclaimed_columns.is_empty());

        let features = plan.encode(&example_profile());
        assert_eq!(features.len(), 16);
        // Four fields map, the lunch block stays zero.
        assert_eq!(features.iter().filter(|v| **v == 1.0).count(), 4);
        let lunch_idx = schema
            .iter()
            .position(|c| c == "lunch_free/reduced")
            .unwrap();
        assert_eq!(features[lunch_idx], 0.0);
    }

    #[test]
    fn extra_schema_column_is_reported_and_never_set() {
        let mut schema = full_schema();
        schema.push("race/ethnicity_group F".to_string());
        let plan = EncoderPlan::build(&schema).unwrap();

        assert!(plan.drift().missing_columns.is_empty());
        assert_eq!(
            plan.drift().unclaimed_columns,
            vec!["race/ethnicity_group F"]
        );
        assert!(plan.resolve(schema.len() - 1).is_none());

        for g in Gender::ALL {
            let profile = StudentProfile {
                gender: g,
                ..example_profile()
            };
            let features = plan.encode(&profile);
            assert_eq!(features[schema.len() - 1], 0.0);
        }
    }

    #[test]
    fn empty_schema_is_rejected() {
        let err = EncoderPlan::build(&[]).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn duplicate_schema_column_is_rejected() {
        let mut schema = full_schema();
        schema.push("gender_female".to_string());
        let err = EncoderPlan::build(&schema).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("gender_female"));
    }
}
