//! Input/output helpers.
//!
//! - profile JSON read (`profile`)
//! - estimate JSON export (`export`)

pub mod export;
pub mod profile;

pub use export::*;
pub use profile::*;
