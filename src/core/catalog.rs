//! Credit catalog: authoritative subject credits per degree and semester.
//!
//! Regular curricula are laid out as degree → semester → slot → subject, and
//! minor/honor curricula as degree → bucket → semester → subject. Maps keep the
//! order of the source file so that slot scanning is deterministic.

use super::error::{GpaError, Result};
use super::models::SemesterLabel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Catalog bundled with the binary, used when no catalog file is configured.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.toml");

/// Subject name → credits.
pub type SubjectCredits = IndexMap<String, u32>;

/// Slot name → subjects offered in that slot.
pub type SemesterSlots = IndexMap<String, SubjectCredits>;

/// Semester label → slots for one degree.
pub type RegularCurriculum = IndexMap<String, SemesterSlots>;

/// Bucket name → semester label → subjects for one degree.
pub type ElectiveBuckets = IndexMap<String, IndexMap<String, SubjectCredits>>;

/// Which curriculum a subject is looked up in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Track {
    /// The degree's regular curriculum
    Regular,
    /// A minor bucket
    Minor(String),
    /// An honors bucket
    Honor(String),
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::Minor(bucket) => write!(f, "minor/{bucket}"),
            Self::Honor(bucket) => write!(f, "honor/{bucket}"),
        }
    }
}

/// Minor and honor offerings of one degree
#[derive(Debug, Clone, Copy)]
pub struct ElectiveOffer<'a> {
    /// Minor buckets, if any
    pub minor: Option<&'a ElectiveBuckets>,
    /// Honor buckets, if any
    pub honor: Option<&'a ElectiveBuckets>,
}

/// Static lookup of subject credits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCatalog {
    /// Degree → regular curriculum
    #[serde(default)]
    pub regular: IndexMap<String, RegularCurriculum>,
    /// Degree → minor buckets
    #[serde(default)]
    pub minor: IndexMap<String, ElectiveBuckets>,
    /// Degree → honor buckets
    #[serde(default)]
    pub honor: IndexMap<String, ElectiveBuckets>,
}

impl CreditCatalog {
    /// Parse a catalog from TOML. `origin` names the source in error messages.
    ///
    /// # Errors
    /// Returns [`GpaError::Decode`] if the TOML does not match the catalog layout.
    pub fn from_toml(toml_str: &str, origin: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|source| GpaError::Decode {
            path: origin.to_string(),
            source,
        })
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    /// Returns an error if the bundled catalog is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_CATALOG, "builtin catalog")
    }

    /// Load a catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| GpaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Load `path` when given, otherwise fall back to the builtin catalog.
    ///
    /// # Errors
    /// Returns an error if the chosen catalog cannot be read or parsed.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::builtin, Self::load)
    }

    /// Add a regular subject, creating the degree/semester/slot as needed.
    pub fn insert_regular(
        &mut self,
        degree: &str,
        semester: SemesterLabel,
        slot: &str,
        subject: &str,
        credits: u32,
    ) {
        self.regular
            .entry(degree.to_string())
            .or_default()
            .entry(semester.to_string())
            .or_default()
            .entry(slot.to_string())
            .or_default()
            .insert(subject.to_string(), credits);
    }

    /// Add a minor or honor subject. `track` must name a bucket; `Regular` is ignored.
    pub fn insert_elective(
        &mut self,
        degree: &str,
        track: &Track,
        semester: SemesterLabel,
        subject: &str,
        credits: u32,
    ) {
        let (table, bucket) = match track {
            Track::Regular => return,
            Track::Minor(bucket) => (&mut self.minor, bucket),
            Track::Honor(bucket) => (&mut self.honor, bucket),
        };
        table
            .entry(degree.to_string())
            .or_default()
            .entry(bucket.clone())
            .or_default()
            .entry(semester.to_string())
            .or_default()
            .insert(subject.to_string(), credits);
    }

    /// Whether the degree has a regular curriculum.
    #[must_use]
    pub fn has_degree(&self, degree: &str) -> bool {
        self.regular.contains_key(degree)
    }

    /// Resolve the credits of `subject` for a student of `degree` in `semester`.
    ///
    /// Regular lookups scan the semester's slots in catalog order and the first
    /// slot listing the (trimmed) name wins; a name repeated across slots always
    /// resolves to the earlier slot. Minor and honor lookups never fall back to
    /// the regular curriculum.
    ///
    /// # Errors
    /// - [`GpaError::UnknownDegree`] when a regular lookup names an unknown degree
    /// - [`GpaError::CreditsNotFound`] when any other level of the lookup is missing
    pub fn resolve_credits(
        &self,
        degree: &str,
        semester: SemesterLabel,
        subject: &str,
        track: &Track,
    ) -> Result<u32> {
        let name = subject.trim();
        let semester_key = semester.to_string();

        let found = match track {
            Track::Regular => {
                let curriculum = self
                    .regular
                    .get(degree)
                    .ok_or_else(|| GpaError::UnknownDegree(degree.to_string()))?;
                curriculum.get(&semester_key).and_then(|slots| {
                    slots
                        .values()
                        .find_map(|subjects| subjects.get(name).copied())
                })
            }
            Track::Minor(bucket) => {
                Self::elective_credits(&self.minor, degree, bucket, &semester_key, name)
            }
            Track::Honor(bucket) => {
                Self::elective_credits(&self.honor, degree, bucket, &semester_key, name)
            }
        };

        found.ok_or_else(|| GpaError::CreditsNotFound {
            subject: name.to_string(),
            semester: semester_key,
            track: track.to_string(),
        })
    }

    fn elective_credits(
        table: &IndexMap<String, ElectiveBuckets>,
        degree: &str,
        bucket: &str,
        semester: &str,
        subject: &str,
    ) -> Option<u32> {
        table
            .get(degree)?
            .get(bucket)?
            .get(semester)?
            .get(subject)
            .copied()
    }

    /// The full regular curriculum of a degree.
    ///
    /// # Errors
    /// Returns [`GpaError::UnknownDegree`] if the degree is not in the catalog.
    pub fn regular_subjects(&self, degree: &str) -> Result<&RegularCurriculum> {
        self.regular
            .get(degree)
            .ok_or_else(|| GpaError::UnknownDegree(degree.to_string()))
    }

    /// Minor and honor buckets offered to a degree.
    ///
    /// # Errors
    /// Returns [`GpaError::NoElectives`] when the degree has neither.
    pub fn elective_buckets(&self, degree: &str) -> Result<ElectiveOffer<'_>> {
        let minor = self.minor.get(degree).filter(|b| !b.is_empty());
        let honor = self.honor.get(degree).filter(|b| !b.is_empty());
        if minor.is_none() && honor.is_none() {
            return Err(GpaError::NoElectives(degree.to_string()));
        }
        Ok(ElectiveOffer { minor, honor })
    }
}
