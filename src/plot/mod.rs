//! Terminal plotting.
//!
//! The deterministic ASCII renderer lives here (used by `gradecast show`);
//! the richer in-form chart is a Plotters widget under `tui`.

pub mod ascii;

pub use ascii::*;
