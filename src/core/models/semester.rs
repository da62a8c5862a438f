//! Semester label model

use crate::core::error::{GpaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of semesters in a degree programme.
pub const MAX_SEMESTERS: u8 = 8;

const PREFIX: &str = "semester_";

/// A validated `semester_<n>` label, `n` in `1..=8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemesterLabel(u8);

impl SemesterLabel {
    /// Create a label from its semester number.
    ///
    /// # Errors
    /// Returns [`GpaError::InvalidSemester`] when `number` is outside `1..=8`.
    pub fn new(number: u8) -> Result<Self> {
        if (1..=MAX_SEMESTERS).contains(&number) {
            Ok(Self(number))
        } else {
            Err(GpaError::InvalidSemester(format!("{PREFIX}{number}")))
        }
    }

    /// The 1-indexed semester number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl FromStr for SemesterLabel {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GpaError::InvalidSemester(s.to_string());
        let digits = s.trim().strip_prefix(PREFIX).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u8 = digits.parse().map_err(|_| invalid())?;
        Self::new(number).map_err(|_| invalid())
    }
}

impl TryFrom<String> for SemesterLabel {
    type Error = GpaError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SemesterLabel> for String {
    fn from(label: SemesterLabel) -> Self {
        label.to_string()
    }
}

impl fmt::Display for SemesterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.0)
    }
}
