//! On-disk persistence of student ledgers, one TOML file per student.

use super::error::{GpaError, Result};
use super::ledger::StudentLedger;
use crate::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Check that `student_id` can name a file inside the store directory.
///
/// # Errors
/// Returns [`GpaError::InvalidStudentId`] for empty ids and ids containing a
/// path separator, `..`, or a NUL byte.
pub fn validate_student_id(student_id: &str) -> Result<()> {
    let bad = student_id.trim().is_empty()
        || student_id.contains(['/', '\\', '\0'])
        || student_id.contains("..");
    if bad {
        debug!("Rejected student id '{student_id}'");
        return Err(GpaError::InvalidStudentId(student_id.to_string()));
    }
    Ok(())
}

/// Directory of `<student_id>.toml` ledger files
#[derive(Debug, Clone)]
pub struct LedgerStore {
    dir: PathBuf,
}

impl LedgerStore {
    /// Store rooted at `dir`; the directory is created on first save
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the ledger files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the ledger file for `student_id`.
    ///
    /// # Errors
    /// Returns [`GpaError::InvalidStudentId`] when the id would leave the store directory.
    pub fn path_for(&self, student_id: &str) -> Result<PathBuf> {
        validate_student_id(student_id)?;
        Ok(self.dir.join(format!("{student_id}.toml")))
    }

    /// Whether a ledger exists for `student_id`; always `false` for invalid ids
    #[must_use]
    pub fn exists(&self, student_id: &str) -> bool {
        self.path_for(student_id).is_ok_and(|path| path.is_file())
    }

    /// Load the ledger for `student_id`.
    ///
    /// # Errors
    /// [`GpaError::InvalidStudentId`] for ids that cannot name a ledger file,
    /// [`GpaError::Io`] if the file cannot be read, [`GpaError::Decode`] if it
    /// is not a valid ledger, and [`GpaError::LedgerMismatch`] if the file
    /// holds a different student.
    pub fn load(&self, student_id: &str) -> Result<StudentLedger> {
        let path = self.path_for(student_id)?;
        let content = fs::read_to_string(&path).map_err(|source| GpaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut ledger: StudentLedger =
            toml::from_str(&content).map_err(|source| GpaError::Decode {
                path: path.display().to_string(),
                source,
            })?;
        if ledger.profile.id != student_id {
            return Err(GpaError::LedgerMismatch {
                path: path.display().to_string(),
                expected: student_id.to_string(),
                found: ledger.profile.id,
            });
        }
        ledger.normalize();
        debug!(
            "Loaded {} semester record(s) from {}",
            ledger.records().len(),
            path.display()
        );
        Ok(ledger)
    }

    /// Write `ledger` to its file, replacing any previous contents.
    ///
    /// # Errors
    /// [`GpaError::InvalidStudentId`] if the profile id cannot name a ledger
    /// file, [`GpaError::Encode`] if serialization fails, [`GpaError::Io`] if
    /// the directory or file cannot be written.
    pub fn save(&self, ledger: &StudentLedger) -> Result<PathBuf> {
        let path = self.path_for(&ledger.profile.id)?;
        let toml_str = toml::to_string_pretty(ledger).map_err(|source| GpaError::Encode {
            what: format!("ledger for {}", ledger.profile.id),
            source,
        })?;
        fs::create_dir_all(&self.dir).map_err(|source| GpaError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        fs::write(&path, toml_str).map_err(|source| GpaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Saved ledger to {}", path.display());
        Ok(path)
    }

    /// Student ids with a ledger in this store, sorted.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    /// [`GpaError::Io`] if the directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|source| GpaError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        let mut ids: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        ids.sort();
        Ok(ids)
    }
}
