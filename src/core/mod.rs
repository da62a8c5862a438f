//! Core module: grade scale, credit catalog, GPA engine, and everything built on it

pub mod catalog;
pub mod cgpa;
pub mod config;
pub mod error;
pub mod gpa;
pub mod grading;
pub mod ledger;
pub mod models;
pub mod predictor;
pub mod progress;
pub mod store;
pub mod transcript;

pub use error::{ErrorKind, GpaError, Result};

/// Returns the current version of the `gpa-tracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
