//! Reporting utilities: currency, estimate summaries, and model descriptions.

pub mod format;

pub use format::*;
