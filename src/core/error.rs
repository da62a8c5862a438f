//! Error types for grade submission, catalog lookup, and aggregation.

use thiserror::Error;

/// Broad class of a [`GpaError`], used by callers to pick a response without
/// matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, rejected before any computation.
    Validation,
    /// A degree, bucket, semester, or subject missing from the credit catalog.
    Lookup,
    /// Input was well-formed but produced no usable state.
    State,
    /// A cumulative figure was requested with nothing to aggregate.
    Aggregation,
    /// Reading or writing catalog and ledger files failed.
    Storage,
}

/// Errors raised by the GPA engine and its collaborators.
#[derive(Debug, Error)]
pub enum GpaError {
    /// Semester label is not `semester_<n>` with `n` in 1..=8.
    #[error("invalid semester format: '{0}'")]
    InvalidSemester(String),

    /// Grade letter is not in the grade-point table.
    #[error("invalid grade \"{grade}\" for subject \"{subject}\"")]
    InvalidGrade {
        /// Subject the grade was submitted for (empty when parsed standalone).
        subject: String,
        /// The rejected letter.
        grade: String,
    },

    /// The same subject (after trimming) appears twice in one submission.
    #[error("subject \"{subject}\" submitted more than once for {semester}")]
    DuplicateSubject {
        /// Trimmed subject name.
        subject: String,
        /// Semester label.
        semester: String,
    },

    /// Student id cannot be used as a ledger file name.
    #[error("invalid student id '{0}': must be non-empty without path separators or '..'")]
    InvalidStudentId(String),

    /// Raw marks outside `[0, 150]`.
    #[error("marks should be between 0 and 150, got {0}")]
    MarksOutOfRange(f64),

    /// Grades submitted for a semester the student has not reached yet.
    #[error("cannot record {requested}: current semester is {current}")]
    FutureSemester {
        /// Semester the grades were submitted for.
        requested: String,
        /// The student's declared current semester.
        current: String,
    },

    /// A prediction feature is outside its accepted range.
    #[error("invalid prediction feature '{feature}': {reason}")]
    InvalidFeature {
        /// Feature name.
        feature: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Degree has no regular curriculum in the catalog.
    #[error("unknown degree: '{0}'")]
    UnknownDegree(String),

    /// Subject could not be resolved to a credit value.
    #[error("credits not found for subject \"{subject}\" in {semester} ({track})")]
    CreditsNotFound {
        /// Subject name as submitted (trimmed).
        subject: String,
        /// Semester label.
        semester: String,
        /// Track description, e.g. `regular` or `minor/Bucket 1`.
        track: String,
    },

    /// Degree offers neither minor nor honor buckets.
    #[error("no minor/honor subjects available for degree '{0}'")]
    NoElectives(String),

    /// Summed credits do not fit the credit counter.
    #[error("credit total overflows for {0}; check the catalog credits")]
    CreditOverflow(String),

    /// Total credits came out as zero, so the semester GPA is undefined.
    #[error("no valid grades provided for {0}")]
    NoValidGrades(String),

    /// Elective grades submitted before the semester's regular grades.
    #[error("{0} has no recorded grades yet")]
    SemesterNotRecorded(String),

    /// No semester has a recorded GPA.
    #[error("no semester has a recorded GPA")]
    NoRecordedGpa,

    /// Filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed into the expected shape.
    #[error("failed to parse {path}: {source}")]
    Decode {
        /// File or source being parsed.
        path: String,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// Ledger file belongs to a different student than its file name says.
    #[error("ledger {path} holds student '{found}', expected '{expected}'")]
    LedgerMismatch {
        /// File that was read.
        path: String,
        /// Id taken from the file name.
        expected: String,
        /// Id stored in the file.
        found: String,
    },

    /// Value could not be serialized to TOML.
    #[error("failed to serialize {what}: {source}")]
    Encode {
        /// What was being written.
        what: String,
        /// Underlying error.
        #[source]
        source: toml::ser::Error,
    },

    /// Transcript template failed to render.
    #[error("failed to render transcript: {0}")]
    Render(#[from] askama::Error),
}

impl GpaError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSemester(_)
            | Self::InvalidGrade { .. }
            | Self::DuplicateSubject { .. }
            | Self::InvalidStudentId(_)
            | Self::MarksOutOfRange(_)
            | Self::FutureSemester { .. }
            | Self::InvalidFeature { .. } => ErrorKind::Validation,
            Self::UnknownDegree(_) | Self::CreditsNotFound { .. } | Self::NoElectives(_) => {
                ErrorKind::Lookup
            }
            Self::NoValidGrades(_) | Self::SemesterNotRecorded(_) | Self::CreditOverflow(_) => {
                ErrorKind::State
            }
            Self::NoRecordedGpa => ErrorKind::Aggregation,
            Self::Io { .. }
            | Self::Decode { .. }
            | Self::LedgerMismatch { .. }
            | Self::Encode { .. }
            | Self::Render(_) => ErrorKind::Storage,
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, GpaError>;
