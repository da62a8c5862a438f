//! Library for `gpa-tracker`
//! Grade-point arithmetic, credit catalogs, and progress forecasting shared by the CLI

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
