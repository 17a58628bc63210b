//! One-hot encoding of form submissions against the trained feature schema.

pub mod plan;

pub use plan::*;
