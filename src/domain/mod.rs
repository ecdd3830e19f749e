//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the categorical attributes (`Sex`, `Smoker`, `Region`)
//! - the validated `Profile` and its partial form `ProfileInput`
//! - the prediction output (`PredictionResult`)

pub mod types;

pub use types::*;
