//! Data models for `gpa-tracker`

pub mod record;
pub mod semester;
pub mod student;

pub use record::{SemesterRecord, SubjectGrade};
pub use semester::{SemesterLabel, MAX_SEMESTERS};
pub use student::StudentProfile;
