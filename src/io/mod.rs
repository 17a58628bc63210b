//! Input/output helpers.
//!
//! - model artifact read/write (`artifact`)
//! - saved prediction read/write (`export`)

pub mod artifact;
pub mod export;

pub use artifact::*;
pub use export::*;
