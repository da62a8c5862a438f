//! Markdown transcript export

use super::error::{GpaError, Result};
use super::ledger::StudentLedger;
use super::models::SubjectGrade;
use super::progress::ProgressSummary;
use super::store::validate_student_id;
use askama::Template;
use std::fs;
use std::path::{Path, PathBuf};

const NOT_AVAILABLE: &str = "n/a";

fn two_places(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}"))
}

/// One subject line
#[derive(Debug, Clone)]
pub struct TranscriptRow {
    /// Subject name
    pub name: String,
    /// Credits
    pub credits: u32,
    /// Letter grade
    pub grade: String,
    /// Raw marks, or `-`
    pub marks: String,
}

impl From<&SubjectGrade> for TranscriptRow {
    fn from(subject: &SubjectGrade) -> Self {
        Self {
            name: subject.name.clone(),
            credits: subject.credits,
            grade: subject.grade.to_string(),
            marks: subject
                .marks
                .map_or_else(|| "-".to_string(), |m| format!("{m}")),
        }
    }
}

/// One semester block
#[derive(Debug, Clone)]
pub struct TranscriptSemester {
    /// `semester_<n>`
    pub label: String,
    /// SGPA to 2 places
    pub gpa: String,
    /// Credits attempted
    pub total_credits: u32,
    /// Credits earned
    pub earned_credits: u32,
    /// Regular subjects
    pub subjects: Vec<TranscriptRow>,
    /// Whether any minor/honor subjects were graded
    pub has_electives: bool,
    /// Minor/honor subjects
    pub electives: Vec<TranscriptRow>,
    /// Minor/honor GPA to 2 places
    pub minor_gpa: String,
}

/// Rendered view of a [`StudentLedger`]
#[derive(Debug, Clone, Template)]
#[template(path = "transcript.md")]
pub struct Transcript {
    /// Student id
    pub student_id: String,
    /// Degree key
    pub degree: String,
    /// Semester reached
    pub current_semester: String,
    /// `regular`, `minor`, `honors`, or `minor + honors`
    pub programme: String,
    /// Target CGPA, or `n/a`
    pub target_cgpa: String,
    /// Semester blocks in order
    pub semesters: Vec<TranscriptSemester>,
    /// CGPA, or `n/a`
    pub cgpa: String,
    /// Best SGPA
    pub best_semester: String,
    /// Worst SGPA
    pub worst_semester: String,
    /// Subjects graded S
    pub topper_count: usize,
    /// Subjects graded F
    pub supply_count: usize,
    /// Backlog credits beyond the allowance
    pub yearback_required: u32,
    /// Required SGPA, `not achievable`, or `n/a`
    pub sgpa_required: String,
    /// Tool version
    pub version: &'static str,
}

impl Transcript {
    /// Build the view for `ledger` with a programme of `total_semesters`.
    #[must_use]
    pub fn new(ledger: &StudentLedger, total_semesters: u8) -> Self {
        let profile = &ledger.profile;
        let summary: ProgressSummary = ledger.summary_with(total_semesters);
        let programme = match (profile.is_minor, profile.is_honors) {
            (false, false) => "regular",
            (true, false) => "minor",
            (false, true) => "honors",
            (true, true) => "minor + honors",
        };

        let semesters = ledger
            .records()
            .iter()
            .map(|record| TranscriptSemester {
                label: record.semester.to_string(),
                gpa: two_places(record.gpa),
                total_credits: record.total_credits,
                earned_credits: record.earned_credits,
                subjects: record.subjects.iter().map(TranscriptRow::from).collect(),
                has_electives: !record.minor_subjects.is_empty(),
                electives: record
                    .minor_subjects
                    .iter()
                    .map(TranscriptRow::from)
                    .collect(),
                minor_gpa: two_places(record.minor_gpa),
            })
            .collect();

        Self {
            student_id: profile.id.clone(),
            degree: profile.degree.clone(),
            current_semester: profile.current_semester.to_string(),
            programme: programme.to_string(),
            target_cgpa: two_places(profile.target_cgpa.filter(|t| *t != 0.0)),
            semesters,
            cgpa: two_places(summary.cgpa),
            best_semester: format!("{:.2}", summary.best_semester),
            worst_semester: format!("{:.2}", summary.worst_semester),
            topper_count: summary.topper_count,
            supply_count: summary.supply_count,
            yearback_required: summary.yearback_required,
            sgpa_required: summary
                .sgpa_required
                .map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.to_string()),
            version: crate::core::get_version(),
        }
    }

    /// Render to Markdown.
    ///
    /// # Errors
    /// Returns [`GpaError::Render`] if the template fails.
    pub fn to_markdown(&self) -> Result<String> {
        Ok(self.render()?)
    }

    /// Render and write to `dir/<student_id>_transcript.md`, creating `dir` if needed.
    ///
    /// # Errors
    /// [`GpaError::InvalidStudentId`] when the id cannot name a file, or
    /// render or I/O errors.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        validate_student_id(&self.student_id)?;
        let path = dir.join(format!("{}_transcript.md", self.student_id));
        self.write_file(&path)?;
        Ok(path)
    }

    /// Render and write to an explicit file path.
    ///
    /// # Errors
    /// Render or I/O errors.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let markdown = self.to_markdown()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| GpaError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }
        fs::write(path, markdown).map_err(|source| GpaError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{CreditCatalog, Track};
    use crate::core::gpa::GradeSubmission;
    use crate::core::models::{SemesterLabel, StudentProfile};
    use tempfile::TempDir;

    fn sem(n: u8) -> SemesterLabel {
        SemesterLabel::new(n).unwrap()
    }

    fn ledger() -> StudentLedger {
        let mut catalog = CreditCatalog::default();
        catalog.insert_regular("CSE", sem(1), "A", "Physics", 4);
        catalog.insert_regular("CSE", sem(1), "B", "Maths", 4);
        catalog.insert_elective("CSE", &Track::Minor("Bucket 1".into()), sem(1), "Robotics", 3);

        let mut profile = StudentProfile::new("KTE21CS011".into(), "CSE".into(), sem(2)).with_target(8.0);
        profile.is_minor = true;
        let mut ledger = StudentLedger::new(profile);
        ledger
            .submit_grades(
                &catalog,
                "semester_1",
                &[
                    GradeSubmission::new("Physics", "S"),
                    GradeSubmission::new("Maths", "F"),
                ],
            )
            .unwrap();
        ledger
            .submit_marks(&catalog, "semester_1", "Maths", 100.0)
            .unwrap();
        ledger
            .submit_electives(
                &catalog,
                "semester_1",
                &Track::Minor("Bucket 1".into()),
                &[GradeSubmission::new("Robotics", "A+")],
            )
            .unwrap();
        ledger
    }

    #[test]
    fn renders_semesters_and_summary() {
        let markdown = Transcript::new(&ledger(), 8).to_markdown().unwrap();
        assert!(markdown.starts_with("# Transcript: KTE21CS011"));
        assert!(markdown.contains("| Programme | minor |"));
        assert!(markdown.contains("### semester_1"));
        assert!(markdown.contains("| Physics | 4 | S | - |"));
        assert!(markdown.contains("| Maths | 4 | C+ | 100 |"));
        assert!(markdown.contains("| Robotics | 3 | A+ | - |"));
        // (40 + 28) / 8
        assert!(markdown.contains("SGPA **8.50**"));
        assert!(markdown.contains("| CGPA | 8.50 |"));
        assert!(markdown.contains("| S grades | 1 |"));
    }

    #[test]
    fn empty_ledger_renders_placeholders() {
        let ledger = StudentLedger::new(StudentProfile::new("x".into(), "CSE".into(), sem(1)));
        let markdown = Transcript::new(&ledger, 8).to_markdown().unwrap();
        assert!(markdown.contains("| CGPA | n/a |"));
        assert!(markdown.contains("| Target CGPA | n/a |"));
        assert!(!markdown.contains("###"));
    }

    #[test]
    fn writes_into_export_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("exports");
        let path = Transcript::new(&ledger(), 8).write_to(&dir).unwrap();
        assert_eq!(path, dir.join("KTE21CS011_transcript.md"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("## Summary"));

        let mut escaping = ledger();
        escaping.profile.id = "../outside".into();
        let err = Transcript::new(&escaping, 8).write_to(&dir).unwrap_err();
        assert!(matches!(err, GpaError::InvalidStudentId(_)));
        assert!(!tmp.path().join("outside_transcript.md").exists());
    }
}
