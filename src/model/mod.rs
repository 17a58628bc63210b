//! Trained-model validation and inference.

pub mod regressor;

pub use regressor::*;
