//! Semester GPA engine
//!
//! Submissions are validated entry by entry (catalog credits first, then the
//! grade letter) before any arithmetic happens; the first bad entry fails the
//! whole semester. Validated entries are folded from zero into fresh totals,
//! so recomputing a semester from the same input always yields the same record.

use super::catalog::{CreditCatalog, Track};
use super::error::{GpaError, Result};
use super::grading::Grade;
use super::models::{SemesterLabel, SemesterRecord, SubjectGrade};
use crate::debug;
use std::str::FromStr;

/// A raw `(subject, grade letter)` pair as submitted by a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSubmission {
    /// Subject name, matched against the catalog after trimming
    pub subject: String,
    /// Grade letter, validated against the grade-point table
    pub grade: String,
}

impl GradeSubmission {
    /// Create a submission
    #[must_use]
    pub fn new(subject: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.into(),
        }
    }
}

impl FromStr for GradeSubmission {
    type Err = String;

    /// Parse `SUBJECT=GRADE`. The last `=` separates the grade so subject names may contain `=`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (subject, grade) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected SUBJECT=GRADE, got '{s}'"))?;
        if subject.trim().is_empty() {
            return Err(format!("missing subject name in '{s}'"));
        }
        Ok(Self::new(subject.trim(), grade.trim()))
    }
}

/// Aggregates of one semester's graded subjects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemesterTotals {
    /// Sum of credits
    pub total_credits: u32,
    /// Sum of grade-point × credits
    pub total_points: f64,
    /// Credits of subjects not graded F
    pub earned_credits: u32,
    /// Number of subjects not graded F
    pub complete_courses: u32,
    /// `total_points / total_credits`, unrounded
    pub gpa: f64,
}

#[derive(Default)]
struct Accumulator {
    credits: u32,
    points: f64,
    earned: u32,
    complete: u32,
}

impl Accumulator {
    /// `None` when a credit counter would overflow.
    fn add(self, entry: &SubjectGrade) -> Option<Self> {
        let weighted = entry.grade.point() * f64::from(entry.credits);
        debug!(
            "{}: {} × {} = {weighted}",
            entry.name,
            entry.grade.point(),
            entry.credits
        );
        let credits = self.credits.checked_add(entry.credits)?;
        let (earned, complete) = if entry.grade.is_pass() {
            (
                self.earned.checked_add(entry.credits)?,
                self.complete.checked_add(1)?,
            )
        } else {
            (self.earned, self.complete)
        };
        Some(Self {
            credits,
            points: self.points + weighted,
            earned,
            complete,
        })
    }
}

/// Resolve credits and parse grades for a batch of submissions.
///
/// Entries are checked in submission order; for each one the duplicate check
/// comes first, then the catalog lookup, then the grade check, and the first
/// failure is returned. Names are compared after trimming.
///
/// # Errors
/// [`GpaError::DuplicateSubject`], lookup errors from the catalog, or
/// [`GpaError::InvalidGrade`].
pub fn resolve_entries(
    catalog: &CreditCatalog,
    degree: &str,
    semester: SemesterLabel,
    track: &Track,
    submissions: &[GradeSubmission],
) -> Result<Vec<SubjectGrade>> {
    let mut resolved: Vec<SubjectGrade> = Vec::with_capacity(submissions.len());
    for submission in submissions {
        let name = submission.subject.trim();
        if resolved.iter().any(|s| s.name == name) {
            return Err(GpaError::DuplicateSubject {
                subject: name.to_string(),
                semester: semester.to_string(),
            });
        }
        let credits = catalog.resolve_credits(degree, semester, name, track)?;
        let grade = Grade::parse_for(&submission.grade, name)?;
        resolved.push(SubjectGrade::new(name.to_string(), credits, grade));
    }
    Ok(resolved)
}

/// Fold a semester's entries into totals.
///
/// # Errors
/// Returns [`GpaError::NoValidGrades`] when the entries carry no credits,
/// since the GPA would be undefined, and [`GpaError::CreditOverflow`] when the
/// credits do not fit a `u32`.
pub fn compute_semester(semester: SemesterLabel, entries: &[SubjectGrade]) -> Result<SemesterTotals> {
    let acc = entries
        .iter()
        .try_fold(Accumulator::default(), Accumulator::add)
        .ok_or_else(|| GpaError::CreditOverflow(semester.to_string()))?;
    debug!(
        "{semester}: credits={}, points={}, earned={}",
        acc.credits, acc.points, acc.earned
    );
    if acc.credits == 0 {
        return Err(GpaError::NoValidGrades(semester.to_string()));
    }
    Ok(SemesterTotals {
        total_credits: acc.credits,
        total_points: acc.points,
        earned_credits: acc.earned,
        complete_courses: acc.complete,
        gpa: acc.points / f64::from(acc.credits),
    })
}

/// Build a fresh record from a semester's regular subjects.
///
/// Elective fields start empty; see [`carry_electives`].
///
/// # Errors
/// Same as [`compute_semester`].
pub fn build_record(semester: SemesterLabel, subjects: Vec<SubjectGrade>) -> Result<SemesterRecord> {
    let totals = compute_semester(semester, &subjects)?;
    Ok(SemesterRecord {
        total_credits: totals.total_credits,
        total_points: totals.total_points,
        earned_credits: totals.earned_credits,
        complete_courses: totals.complete_courses,
        gpa: Some(totals.gpa),
        subjects,
        ..SemesterRecord::empty(semester)
    })
}

/// Copy the minor/honor fields of `previous` into `record`, leaving regular totals alone.
pub fn carry_electives(record: &mut SemesterRecord, previous: &SemesterRecord) {
    record.minor_credits = previous.minor_credits;
    record.minor_points = previous.minor_points;
    record.minor_gpa = previous.minor_gpa;
    record.minor_subjects.clone_from(&previous.minor_subjects);
}

/// Recompute the minor/honor totals of `record` from `subjects`.
///
/// Runs the same fold as the regular engine on a separate accumulator and
/// returns a new record; the regular totals are copied through unchanged.
///
/// # Errors
/// Same as [`compute_semester`].
pub fn apply_electives(
    record: &SemesterRecord,
    subjects: Vec<SubjectGrade>,
) -> Result<SemesterRecord> {
    let totals = compute_semester(record.semester, &subjects)?;
    Ok(SemesterRecord {
        minor_credits: totals.total_credits,
        minor_points: totals.total_points,
        minor_gpa: Some(totals.gpa),
        minor_subjects: subjects,
        ..record.clone()
    })
}
