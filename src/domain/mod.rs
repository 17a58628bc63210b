//! Domain types used throughout the prediction flow.
//!
//! This module defines:
//!
//! - the five closed form fields (`FieldKind` plus one enum per field)
//! - full form submissions (`StudentProfile`)
//! - model artifacts (`ModelFile`, `LinearModel`, `TrainQuality`)
//! - saved predictions (`PredictionFile`) and presentation constants

pub mod types;

pub use types::*;
