//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a prediction cycle
//! - exported to JSON (saved predictions)
//! - reloaded later for re-rendering or comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed reference score the comparison chart draws next to every prediction.
pub const REFERENCE_SCORE: f64 = 200.0;

/// Presentation clamp for bar heights (the model itself is not clamped).
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 300.0;

/// Fixed y-axis ceiling of the comparison chart.
pub const CHART_Y_MAX: f64 = 350.0;

/// Bundled model artifact, used when neither `--model` nor `GRADECAST_MODEL`
/// says otherwise.
pub const DEFAULT_MODEL_PATH: &str = "modelo_rendimento_escolar.json";

/// The five form fields, in the column order of the training dataset.
///
/// The dataset column names (`column_name`) are load-bearing: the trained
/// schema's one-hot columns are `<column_name>_<value label>`, so changing
/// them breaks encoding against existing artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Gender,
    EthnicGroup,
    ParentalEducation,
    LunchType,
    TestPrep,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Gender,
        FieldKind::EthnicGroup,
        FieldKind::ParentalEducation,
        FieldKind::LunchType,
        FieldKind::TestPrep,
    ];

    /// Training-time dataset column this field was one-hot encoded under.
    pub fn column_name(self) -> &'static str {
        match self {
            FieldKind::Gender => "gender",
            FieldKind::EthnicGroup => "race/ethnicity",
            FieldKind::ParentalEducation => "parental level of education",
            FieldKind::LunchType => "lunch",
            FieldKind::TestPrep => "test preparation course",
        }
    }

    /// Form label shown to the user (the original app's Portuguese wording).
    pub fn prompt_label(self) -> &'static str {
        match self {
            FieldKind::Gender => "Gênero",
            FieldKind::EthnicGroup => "Grupo étnico",
            FieldKind::ParentalEducation => "Nível de educação dos pais",
            FieldKind::LunchType => "Tipo de almoço",
            FieldKind::TestPrep => "Curso de preparação para o teste",
        }
    }

    /// The closed set of dataset value labels this field can take, in the
    /// order the form cycles through them.
    pub fn domain(self) -> &'static [&'static str] {
        match self {
            FieldKind::Gender => Gender::LABELS,
            FieldKind::EthnicGroup => EthnicGroup::LABELS,
            FieldKind::ParentalEducation => ParentalEducation::LABELS,
            FieldKind::LunchType => LunchType::LABELS,
            FieldKind::TestPrep => TestPrep::LABELS,
        }
    }

    /// Position of this field in [`FieldKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            FieldKind::Gender => 0,
            FieldKind::EthnicGroup => 1,
            FieldKind::ParentalEducation => 2,
            FieldKind::LunchType => 3,
            FieldKind::TestPrep => 4,
        }
    }
}

fn cycled<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(idx + step).rem_euclid(len) as usize]
}

fn ordinal_of<T: Copy + PartialEq>(all: &[T], current: T) -> usize {
    all.iter().position(|v| *v == current).unwrap_or(0)
}

/// Student gender, as labeled in the training dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "female")]
    Female,
    #[serde(rename = "male")]
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];
    pub const LABELS: &'static [&'static str] = &["female", "male"];

    /// Dataset value label (exactly as the training data spelled it).
    pub fn label(self) -> &'static str {
        Self::LABELS[self.ordinal()]
    }

    pub fn ordinal(self) -> usize {
        ordinal_of(&Self::ALL, self)
    }

    pub fn next(self) -> Self {
        cycled(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycled(&Self::ALL, self, -1)
    }
}

/// Race/ethnicity group, anonymized to letters in the training dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EthnicGroup {
    #[serde(rename = "group A")]
    GroupA,
    #[serde(rename = "group B")]
    GroupB,
    #[serde(rename = "group C")]
    GroupC,
    #[serde(rename = "group D")]
    GroupD,
    #[serde(rename = "group E")]
    GroupE,
}

impl EthnicGroup {
    pub const ALL: [EthnicGroup; 5] = [
        EthnicGroup::GroupA,
        EthnicGroup::GroupB,
        EthnicGroup::GroupC,
        EthnicGroup::GroupD,
        EthnicGroup::GroupE,
    ];
    pub const LABELS: &'static [&'static str] =
        &["group A", "group B", "group C", "group D", "group E"];

    pub fn label(self) -> &'static str {
        Self::LABELS[self.ordinal()]
    }

    pub fn ordinal(self) -> usize {
        ordinal_of(&Self::ALL, self)
    }

    pub fn next(self) -> Self {
        cycled(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycled(&Self::ALL, self, -1)
    }
}

/// Highest education level attained by the student's parents.
///
/// Values are ordered as the original form offered them, not as the schema's
/// alphabetical columns; encoding resolves columns by name, so the two
/// orders are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentalEducation {
    #[serde(rename = "some high school")]
    SomeHighSchool,
    #[serde(rename = "high school")]
    HighSchool,
    #[serde(rename = "some college")]
    SomeCollege,
    #[serde(rename = "associate's degree")]
    AssociatesDegree,
    #[serde(rename = "bachelor's degree")]
    BachelorsDegree,
    #[serde(rename = "master's degree")]
    MastersDegree,
}

impl ParentalEducation {
    pub const ALL: [ParentalEducation; 6] = [
        ParentalEducation::SomeHighSchool,
        ParentalEducation::HighSchool,
        ParentalEducation::SomeCollege,
        ParentalEducation::AssociatesDegree,
        ParentalEducation::BachelorsDegree,
        ParentalEducation::MastersDegree,
    ];
    pub const LABELS: &'static [&'static str] = &[
        "some high school",
        "high school",
        "some college",
        "associate's degree",
        "bachelor's degree",
        "master's degree",
    ];

    pub fn label(self) -> &'static str {
        Self::LABELS[self.ordinal()]
    }

    pub fn ordinal(self) -> usize {
        ordinal_of(&Self::ALL, self)
    }

    pub fn next(self) -> Self {
        cycled(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycled(&Self::ALL, self, -1)
    }
}

/// Lunch plan the student is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LunchType {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "free/reduced")]
    FreeReduced,
}

impl LunchType {
    pub const ALL: [LunchType; 2] = [LunchType::Standard, LunchType::FreeReduced];
    pub const LABELS: &'static [&'static str] = &["standard", "free/reduced"];

    pub fn label(self) -> &'static str {
        Self::LABELS[self.ordinal()]
    }

    pub fn ordinal(self) -> usize {
        ordinal_of(&Self::ALL, self)
    }

    pub fn next(self) -> Self {
        cycled(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycled(&Self::ALL, self, -1)
    }
}

/// Whether the student completed the test preparation course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestPrep {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "completed")]
    Completed,
}

impl TestPrep {
    pub const ALL: [TestPrep; 2] = [TestPrep::None, TestPrep::Completed];
    pub const LABELS: &'static [&'static str] = &["none", "completed"];

    pub fn label(self) -> &'static str {
        Self::LABELS[self.ordinal()]
    }

    pub fn ordinal(self) -> usize {
        ordinal_of(&Self::ALL, self)
    }

    pub fn next(self) -> Self {
        cycled(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycled(&Self::ALL, self, -1)
    }
}

/// One full form submission.
///
/// Every field is non-null and in-domain by construction; there is no
/// free-text entry anywhere, so no validation layer exists downstream of
/// this struct.
///
/// Serde renames keep the serialized keys identical to the training
/// dataset's column names, so a saved prediction echoes the exact row the
/// model saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub gender: Gender,
    #[serde(rename = "race/ethnicity")]
    pub ethnic_group: EthnicGroup,
    #[serde(rename = "parental level of education")]
    pub parental_education: ParentalEducation,
    #[serde(rename = "lunch")]
    pub lunch_type: LunchType,
    #[serde(rename = "test preparation course")]
    pub test_prep: TestPrep,
}

impl Default for StudentProfile {
    /// The original form's first offered option for every field.
    fn default() -> Self {
        Self {
            gender: Gender::Female,
            ethnic_group: EthnicGroup::GroupA,
            parental_education: ParentalEducation::SomeHighSchool,
            lunch_type: LunchType::Standard,
            test_prep: TestPrep::None,
        }
    }
}

impl StudentProfile {
    /// Dataset value label currently selected for `field`.
    pub fn value_label(&self, field: FieldKind) -> &'static str {
        match field {
            FieldKind::Gender => self.gender.label(),
            FieldKind::EthnicGroup => self.ethnic_group.label(),
            FieldKind::ParentalEducation => self.parental_education.label(),
            FieldKind::LunchType => self.lunch_type.label(),
            FieldKind::TestPrep => self.test_prep.label(),
        }
    }

    /// Position of the selected value within `field`'s domain.
    pub fn ordinal(&self, field: FieldKind) -> usize {
        match field {
            FieldKind::Gender => self.gender.ordinal(),
            FieldKind::EthnicGroup => self.ethnic_group.ordinal(),
            FieldKind::ParentalEducation => self.parental_education.ordinal(),
            FieldKind::LunchType => self.lunch_type.ordinal(),
            FieldKind::TestPrep => self.test_prep.ordinal(),
        }
    }

    /// Cycle `field` by `step` positions through its domain, wrapping at
    /// the ends (`step` may be negative).
    pub fn cycle(&mut self, field: FieldKind, step: isize) {
        match field {
            FieldKind::Gender => self.gender = cycled(&Gender::ALL, self.gender, step),
            FieldKind::EthnicGroup => {
                self.ethnic_group = cycled(&EthnicGroup::ALL, self.ethnic_group, step)
            }
            FieldKind::ParentalEducation => {
                self.parental_education =
                    cycled(&ParentalEducation::ALL, self.parental_education, step)
            }
            FieldKind::LunchType => {
                self.lunch_type = cycled(&LunchType::ALL, self.lunch_type, step)
            }
            FieldKind::TestPrep => self.test_prep = cycled(&TestPrep::ALL, self.test_prep, step),
        }
    }
}

/// Trained linear model: `score = intercept + coefficients · features`,
/// with `coefficients` aligned one-to-one with `feature_names`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// Ordered one-hot feature columns the model was trained on.
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Training-time diagnostics carried along for reporting.
///
/// Inference never reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainQuality {
    pub r2: f64,
    pub rmse: f64,
    pub n: usize,
}

/// A model artifact file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    /// What the score means (e.g. "nota média (0-300)").
    pub target: String,
    pub trained_at: NaiveDate,
    pub model: LinearModel,
    pub quality: TrainQuality,
}

/// A saved prediction file (JSON) — one form submission plus its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFile {
    pub tool: String,
    pub saved_at: NaiveDate,
    pub target: String,
    pub profile: StudentProfile,
    pub score: f64,
    pub reference: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub model_path: PathBuf,
    /// Where the form's save key writes the last prediction.
    pub export_path: PathBuf,
}
