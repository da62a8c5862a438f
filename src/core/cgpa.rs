//! Cumulative GPA across recorded semesters.
//!
//! CGPA here is the plain arithmetic mean of semester GPAs, not weighted by
//! credits, even though each semester GPA is itself credit-weighted. The
//! target-CGPA forecast in [`super::progress`] is derived from this exact
//! definition, so the two must change together if weighting is ever adopted.

use super::error::{GpaError, Result};
use super::models::SemesterRecord;

fn mean(values: impl Iterator<Item = f64>) -> Result<f64> {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return Err(GpaError::NoRecordedGpa);
    }
    Ok(sum / f64::from(count))
}

/// Mean of `gpa` over semesters that have one. Ungraded semesters are skipped, not counted as zero.
///
/// # Errors
/// Returns [`GpaError::NoRecordedGpa`] when no semester has a GPA.
pub fn cgpa(records: &[SemesterRecord]) -> Result<f64> {
    mean(records.iter().filter_map(|r| r.gpa))
}

/// Mean of `minor_gpa` over semesters that have one.
///
/// # Errors
/// Returns [`GpaError::NoRecordedGpa`] when no semester has a minor/honor GPA.
pub fn minor_cgpa(records: &[SemesterRecord]) -> Result<f64> {
    mean(records.iter().filter_map(|r| r.minor_gpa))
}
