//! Formatted terminal output: the success line, the echo table, saved
//! prediction reports, and the schema/drift report.
//!
//! We keep formatting code in one place so:
//! - the encoding/inference code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use std::path::Path;

use crate::domain::{FieldKind, PredictionFile, StudentProfile};
use crate::encode::{EncoderPlan, SchemaDrift};
use crate::model::Regressor;

/// The user-facing success line (the original app's wording).
pub fn format_success_line(score: f64) -> String {
    format!("Nota média prevista: {score:.2}")
}

/// Echo table of the submitted values, keyed by the form's labels.
pub fn format_echo_table(profile: &StudentProfile) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<34} {:<20}\n", "Campo", "Valor").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<34} {:-<20}\n", "", "").trim_end());
    out.push('\n');

    for field in FieldKind::ALL {
        out.push_str(
            format!(
                "{:<34} {:<20}\n",
                field.prompt_label(),
                profile.value_label(field)
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Full text report for a saved prediction: header, echo table, success
/// line, and the reference it was compared against.
pub fn format_prediction_report(prediction: &PredictionFile) -> String {
    let mut out = String::new();

    out.push_str("=== gradecast - Previsão de Rendimento Escolar ===\n");
    out.push_str(&format!("Alvo: {}\n", prediction.target));
    out.push_str(&format!("Salvo em: {}\n", prediction.saved_at));
    out.push('\n');

    out.push_str(&format_echo_table(&prediction.profile));
    out.push('\n');

    out.push_str(&format_success_line(prediction.score));
    out.push('\n');
    out.push_str(&format!(
        "Referência de comparação: {:.2}\n",
        prediction.reference
    ));

    out
}

/// Schema report: artifact metadata, every feature column with the form
/// value that sets it, and any drift between form domains and schema.
pub fn format_schema_report(path: &Path, regressor: &Regressor, plan: &EncoderPlan) -> String {
    let meta = regressor.meta();
    let mut out = String::new();

    out.push_str("=== gradecast - model schema ===\n");
    out.push_str(&format!("Artifact: {}\n", path.display()));
    out.push_str(&format!("Tool: {}\n", meta.tool));
    out.push_str(&format!("Target: {}\n", meta.target));
    out.push_str(&format!(
        "Trained: {} | r2={:.3} rmse={:.2} n={}\n",
        meta.trained_at, meta.quality.r2, meta.quality.rmse, meta.quality.n
    ));
    out.push_str(&format!("Columns: {}\n", plan.len()));
    out.push('\n');

    out.push_str(format!("{:>4} {:<48} {:<40}\n", "idx", "column", "set by").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<48} {:-<40}\n", "", "", "").trim_end());
    out.push('\n');

    for (idx, column) in plan.columns().iter().enumerate() {
        let set_by = match plan.resolve(idx) {
            Some((field, label)) => format!("{} = {}", field.column_name(), label),
            None => "(never set by the form)".to_string(),
        };
        out.push_str(format!("{idx:>4} {:<48} {set_by:<40}\n", truncate(column, 48)).trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format_drift(plan.drift()));

    out
}

/// One-paragraph drift summary, shared by the schema report and startup
/// warnings.
pub fn format_drift(drift: &SchemaDrift) -> String {
    if drift.is_clean() {
        return "Drift: none (every form value maps to a schema column).\n".to_string();
    }

    let mut out = String::new();
    out.push_str("Drift:\n");
    if !drift.missing_columns.is_empty() {
        out.push_str("- form values with no schema column (their field encodes as zeros):\n");
        for name in &drift.missing_columns {
            out.push_str(&format!("    {name}\n"));
        }
    }
    if !drift.unclaimed_columns.is_empty() {
        out.push_str("- schema columns never set by the form (always 0):\n");
        for name in &drift.unclaimed_columns {
            out.push_str(&format!("    {name}\n"));
        }
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
