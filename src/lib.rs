//! `medinsure` library crate.
//!
//! The binary (`medinsure`) is a thin wrapper around this library so that:
//!
//! - the prediction service is testable without spawning processes
//! - the model, feature encoding and breakdown are reusable from other front-ends
//! - presentation (CLI text, TUI widgets) stays out of the core

pub mod app;
pub mod breakdown;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod service;
pub mod tui;
