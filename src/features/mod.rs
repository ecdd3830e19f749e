//! Feature record construction and encoding.

pub mod record;

pub use record::*;
