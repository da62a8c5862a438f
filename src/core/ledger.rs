//! Student ledger: a profile plus one record per graded semester.
//!
//! Each submission builds the replacement record off to the side and only
//! swaps it in once every entry has validated and the totals are defined, so
//! a failed submission leaves the ledger exactly as it was.

use super::catalog::{CreditCatalog, Track};
use super::cgpa;
use super::error::{GpaError, Result};
use super::gpa::{apply_electives, build_record, carry_electives, resolve_entries, GradeSubmission};
use super::grading::{letter_from_marks, round2, Grade};
use super::models::{SemesterLabel, SemesterRecord, StudentProfile, SubjectGrade};
use super::progress::ProgressSummary;
use crate::info;
use serde::{Deserialize, Serialize};

/// Rounded figures reported after a semester is (re)computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemesterOutcome {
    /// Semester (or minor/honor) GPA, 2 decimals
    pub semester_gpa: f64,
    /// CGPA after the update, 2 decimals
    pub cgpa: f64,
}

/// Result of grading one subject from raw marks
#[derive(Debug, Clone, PartialEq)]
pub struct MarksOutcome {
    /// Subject name as stored
    pub subject: String,
    /// Semester the subject belongs to
    pub semester: SemesterLabel,
    /// Marks as submitted
    pub marks: f64,
    /// Letter derived from the marks
    pub grade: Grade,
    /// Semester GPA after recomputation, 2 decimals
    pub semester_gpa: f64,
}

/// A student's profile and semester records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLedger {
    /// Who the records belong to
    pub profile: StudentProfile,

    /// Semester records, sorted by semester, at most one per semester
    #[serde(default)]
    semesters: Vec<SemesterRecord>,
}

impl StudentLedger {
    /// A ledger with no recorded semesters
    #[must_use]
    pub const fn new(profile: StudentProfile) -> Self {
        Self {
            profile,
            semesters: Vec::new(),
        }
    }

    /// Records in semester order
    #[must_use]
    pub fn records(&self) -> &[SemesterRecord] {
        &self.semesters
    }

    /// The record for `semester`, if graded
    #[must_use]
    pub fn record(&self, semester: SemesterLabel) -> Option<&SemesterRecord> {
        self.semesters.iter().find(|r| r.semester == semester)
    }

    /// Re-sort after loading from an external source.
    pub(crate) fn normalize(&mut self) {
        self.semesters.sort_by_key(|r| r.semester);
        self.semesters.dedup_by_key(|r| r.semester);
    }

    /// Insert or replace the record for its semester.
    pub fn upsert(&mut self, record: SemesterRecord) {
        match self
            .semesters
            .binary_search_by_key(&record.semester, |r| r.semester)
        {
            Ok(idx) => self.semesters[idx] = record,
            Err(idx) => self.semesters.insert(idx, record),
        }
    }

    /// CGPA over graded semesters.
    ///
    /// # Errors
    /// Returns [`GpaError::NoRecordedGpa`] when nothing is graded.
    pub fn cgpa(&self) -> Result<f64> {
        cgpa::cgpa(&self.semesters)
    }

    /// Derived progress figures for an eight-semester programme.
    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary::for_programme(&self.profile, &self.semesters)
    }

    /// Derived progress figures for a programme of `total_semesters`.
    #[must_use]
    pub fn summary_with(&self, total_semesters: u8) -> ProgressSummary {
        ProgressSummary::compute(&self.profile, &self.semesters, total_semesters)
    }

    fn reachable_semester(&self, semester: &str) -> Result<SemesterLabel> {
        let label: SemesterLabel = semester.parse()?;
        if !self.profile.has_reached(label) {
            return Err(GpaError::FutureSemester {
                requested: label.to_string(),
                current: self.profile.current_semester.to_string(),
            });
        }
        Ok(label)
    }

    fn outcome(&self, semester_gpa: f64) -> Result<SemesterOutcome> {
        Ok(SemesterOutcome {
            semester_gpa: round2(semester_gpa),
            cgpa: round2(self.cgpa()?),
        })
    }

    /// Record a semester's regular grades, replacing any earlier submission.
    ///
    /// Minor/honor results already recorded for the semester are kept.
    ///
    /// # Errors
    /// Validation, lookup, or state errors; the ledger is unchanged on error.
    pub fn submit_grades(
        &mut self,
        catalog: &CreditCatalog,
        semester: &str,
        grades: &[GradeSubmission],
    ) -> Result<SemesterOutcome> {
        let label = self.reachable_semester(semester)?;
        let subjects = resolve_entries(catalog, &self.profile.degree, label, &Track::Regular, grades)?;
        let mut record = build_record(label, subjects)?;
        if let Some(previous) = self.record(label) {
            carry_electives(&mut record, previous);
        }
        let gpa = record.gpa.unwrap_or_default();
        info!(
            "Recorded {label} for {}: {} credits, GPA {:.2}",
            self.profile.id, record.total_credits, gpa
        );
        self.upsert(record);
        self.outcome(gpa)
    }

    /// Grade one subject from raw marks and recompute its semester.
    ///
    /// The subject replaces any earlier grade for the same name; the rest of
    /// the semester's subjects stay as recorded.
    ///
    /// # Errors
    /// Validation, lookup, or state errors; the ledger is unchanged on error.
    pub fn submit_marks(
        &mut self,
        catalog: &CreditCatalog,
        semester: &str,
        subject: &str,
        marks: f64,
    ) -> Result<MarksOutcome> {
        let label = self.reachable_semester(semester)?;
        let grade = letter_from_marks(marks)?;
        let name = subject.trim();
        let credits = catalog.resolve_credits(&self.profile.degree, label, name, &Track::Regular)?;
        let graded = SubjectGrade::new(name.to_string(), credits, grade).with_marks(marks);

        let previous = self.record(label);
        let mut subjects: Vec<SubjectGrade> = previous
            .map(|r| r.subjects.iter().filter(|s| s.name != name).cloned().collect())
            .unwrap_or_default();
        subjects.push(graded);

        let mut record = build_record(label, subjects)?;
        if let Some(previous) = previous {
            carry_electives(&mut record, previous);
        }
        let gpa = record.gpa.unwrap_or_default();
        info!("Graded {name} in {label} from {marks} marks: {grade}");
        self.upsert(record);

        Ok(MarksOutcome {
            subject: name.to_string(),
            semester: label,
            marks,
            grade,
            semester_gpa: round2(gpa),
        })
    }

    /// Record minor or honor grades for a semester that already has regular grades.
    ///
    /// # Errors
    /// Validation, lookup, or state errors (including
    /// [`GpaError::SemesterNotRecorded`]); the ledger is unchanged on error.
    pub fn submit_electives(
        &mut self,
        catalog: &CreditCatalog,
        semester: &str,
        track: &Track,
        grades: &[GradeSubmission],
    ) -> Result<SemesterOutcome> {
        let label = self.reachable_semester(semester)?;
        let existing = self
            .record(label)
            .ok_or_else(|| GpaError::SemesterNotRecorded(label.to_string()))?;
        let subjects = resolve_entries(catalog, &self.profile.degree, label, track, grades)?;
        let record = apply_electives(existing, subjects)?;
        let minor_gpa = record.minor_gpa.unwrap_or_default();
        info!(
            "Recorded {track} grades for {label}: {} credits, GPA {:.2}",
            record.minor_credits, minor_gpa
        );
        self.upsert(record);
        self.outcome(minor_gpa)
    }
}
