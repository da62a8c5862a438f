//! Student profile model

use super::SemesterLabel;
use serde::{Deserialize, Serialize};

/// Who a ledger belongs to and how far they have progressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Student identifier (e.g., university registration number)
    pub id: String,

    /// Degree key into the credit catalog (e.g., "CSE")
    pub degree: String,

    /// Semester the student has currently reached
    pub current_semester: SemesterLabel,

    /// CGPA the student is aiming for at graduation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cgpa: Option<f64>,

    /// Enrolled in a minor programme
    #[serde(default)]
    pub is_minor: bool,

    /// Enrolled in an honors programme
    #[serde(default)]
    pub is_honors: bool,
}

impl StudentProfile {
    /// Create a profile with no target and no minor/honor enrolment
    #[must_use]
    pub const fn new(id: String, degree: String, current_semester: SemesterLabel) -> Self {
        Self {
            id,
            degree,
            current_semester,
            target_cgpa: None,
            is_minor: false,
            is_honors: false,
        }
    }

    /// Set the target CGPA
    #[must_use]
    pub const fn with_target(mut self, target: f64) -> Self {
        self.target_cgpa = Some(target);
        self
    }

    /// Whether grades may be recorded for `semester`
    #[must_use]
    pub fn has_reached(&self, semester: SemesterLabel) -> bool {
        semester <= self.current_semester
    }
}
