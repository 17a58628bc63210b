//! Text presentation for predictions and model schemas.

pub mod format;

pub use format::*;
