//! Semester record model

use super::SemesterLabel;
use crate::core::grading::Grade;
use serde::{Deserialize, Serialize};

/// A graded subject within one semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrade {
    /// Subject name as listed in the credit catalog
    pub name: String,

    /// Credits, always taken from the catalog
    pub credits: u32,

    /// Letter grade
    pub grade: Grade,

    /// Raw marks, when the grade was derived from marks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<f64>,
}

impl SubjectGrade {
    /// Create a subject grade without marks
    #[must_use]
    pub const fn new(name: String, credits: u32, grade: Grade) -> Self {
        Self {
            name,
            credits,
            grade,
            marks: None,
        }
    }

    /// Attach the raw marks the grade was derived from
    #[must_use]
    pub const fn with_marks(mut self, marks: f64) -> Self {
        self.marks = Some(marks);
        self
    }
}

/// Per-semester aggregate for one student.
///
/// Only ever built from a complete engine run; re-submitting a semester
/// replaces the record rather than patching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// Semester this record belongs to
    pub semester: SemesterLabel,

    /// Sum of regular subject credits
    pub total_credits: u32,

    /// Sum of grade-point × credits over regular subjects
    pub total_points: f64,

    /// Credits of regular subjects not graded F
    pub earned_credits: u32,

    /// Number of regular subjects not graded F
    pub complete_courses: u32,

    /// Semester GPA at full precision; `None` until the semester is graded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,

    /// Sum of minor/honor subject credits
    #[serde(default)]
    pub minor_credits: u32,

    /// Sum of grade-point × credits over minor/honor subjects
    #[serde(default)]
    pub minor_points: f64,

    /// Minor/honor GPA at full precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_gpa: Option<f64>,

    /// Regular subjects that produced the totals above
    #[serde(default)]
    pub subjects: Vec<SubjectGrade>,

    /// Minor/honor subjects that produced the minor totals
    #[serde(default)]
    pub minor_subjects: Vec<SubjectGrade>,
}

impl SemesterRecord {
    /// An ungraded record for `semester`
    #[must_use]
    pub const fn empty(semester: SemesterLabel) -> Self {
        Self {
            semester,
            total_credits: 0,
            total_points: 0.0,
            earned_credits: 0,
            complete_courses: 0,
            gpa: None,
            minor_credits: 0,
            minor_points: 0.0,
            minor_gpa: None,
            subjects: Vec::new(),
            minor_subjects: Vec::new(),
        }
    }

    /// Credits attempted but not earned (failed subjects)
    #[must_use]
    pub const fn failed_credits(&self) -> u32 {
        self.total_credits.saturating_sub(self.earned_credits)
    }

    /// All graded subjects, regular first
    pub fn all_subjects(&self) -> impl Iterator<Item = &SubjectGrade> {
        self.subjects.iter().chain(self.minor_subjects.iter())
    }
}
