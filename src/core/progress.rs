//! Progress analysis: best/worst semesters, grade counts, backlog, and forecasting

use super::cgpa::cgpa;
use super::grading::{round2, Grade, MAX_GRADE_POINT};
use super::models::{SemesterRecord, StudentProfile, MAX_SEMESTERS};
use std::fmt;

/// A credit-backlog checkpoint: students at or below `up_to_semester` may
/// carry at most `allowance` failed credits from semesters `1..=window`.
#[derive(Debug, Clone, Copy)]
struct BacklogCheckpoint {
    up_to_semester: u8,
    window: u8,
    allowance: u32,
}

/// Checked in order; the first checkpoint the student has not passed applies.
/// Beyond the last checkpoint no backlog rule is defined and the deficit is 0.
const BACKLOG_CHECKPOINTS: [BacklogCheckpoint; 2] = [
    BacklogCheckpoint {
        up_to_semester: 4,
        window: 2,
        allowance: 17,
    },
    BacklogCheckpoint {
        up_to_semester: 6,
        window: 4,
        allowance: 41,
    },
];

/// SGPA needed in every remaining semester to reach a target CGPA
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequiredSgpa {
    /// Reachable with this SGPA (rounded to 2 places; may be negative when already secured)
    Needed(f64),
    /// Would need more than the maximum grade-point
    NotAchievable,
}

impl fmt::Display for RequiredSgpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Needed(sgpa) => write!(f, "{sgpa:.2}"),
            Self::NotAchievable => write!(f, "not achievable"),
        }
    }
}

/// Highest and lowest semester GPA, `(0.0, 0.0)` when nothing is recorded.
#[must_use]
pub fn best_worst(records: &[SemesterRecord]) -> (f64, f64) {
    let mut gpas = records.iter().filter_map(|r| r.gpa);
    let Some(first) = gpas.next() else {
        return (0.0, 0.0);
    };
    gpas.fold((first, first), |(best, worst), gpa| {
        (best.max(gpa), worst.min(gpa))
    })
}

fn count_grade(records: &[SemesterRecord], grade: Grade) -> usize {
    records
        .iter()
        .flat_map(SemesterRecord::all_subjects)
        .filter(|s| s.grade == grade)
        .count()
}

/// Number of subjects graded S, regular and elective.
#[must_use]
pub fn topper_count(records: &[SemesterRecord]) -> usize {
    count_grade(records, Grade::S)
}

/// Number of subjects graded F, regular and elective.
#[must_use]
pub fn supply_count(records: &[SemesterRecord]) -> usize {
    count_grade(records, Grade::F)
}

/// Failed credits beyond the allowance at the student's next checkpoint.
///
/// Semesters are selected by number, so record order does not matter.
#[must_use]
pub fn backlog_deficit(records: &[SemesterRecord], current_semester: u8) -> u32 {
    let Some(checkpoint) = BACKLOG_CHECKPOINTS
        .iter()
        .find(|c| current_semester <= c.up_to_semester)
    else {
        return 0;
    };
    let failed: u32 = records
        .iter()
        .filter(|r| r.semester.number() <= checkpoint.window)
        .map(SemesterRecord::failed_credits)
        .fold(0, u32::saturating_add);
    failed.saturating_sub(checkpoint.allowance)
}

/// SGPA needed in each remaining semester for the CGPA to reach `target_cgpa`.
///
/// Returns `None` when no target is set (or it is zero) or the student is
/// already in the final semester. The result is rounded before the
/// achievability check, so exactly 10.0 is still achievable.
#[must_use]
pub fn required_future_sgpa(
    current_cgpa: f64,
    current_semester: u8,
    target_cgpa: Option<f64>,
    total_semesters: u8,
) -> Option<RequiredSgpa> {
    let target = target_cgpa.filter(|t| *t != 0.0)?;
    if current_semester >= total_semesters {
        return None;
    }
    let remaining = f64::from(total_semesters - current_semester);
    let earned_sum = current_cgpa * f64::from(current_semester);
    let required_sum = target * f64::from(total_semesters);
    let required = round2((required_sum - earned_sum) / remaining);
    if required > MAX_GRADE_POINT {
        Some(RequiredSgpa::NotAchievable)
    } else {
        Some(RequiredSgpa::Needed(required))
    }
}

/// Derived view of a student's progress; recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    /// Unrounded CGPA, `None` when no semester is graded
    pub cgpa: Option<f64>,
    /// Highest semester GPA
    pub best_semester: f64,
    /// Lowest semester GPA
    pub worst_semester: f64,
    /// Subjects graded S
    pub topper_count: usize,
    /// Subjects graded F
    pub supply_count: usize,
    /// Total credits per recorded semester, in semester order
    pub total_credits: Vec<u32>,
    /// Earned credits per recorded semester, in semester order
    pub earned_credits: Vec<u32>,
    /// Credits that must be cleared before the next checkpoint
    pub yearback_required: u32,
    /// SGPA needed per remaining semester for the target CGPA
    pub sgpa_required: Option<RequiredSgpa>,
}

impl ProgressSummary {
    /// Summarise `records` for `profile`.
    ///
    /// With no graded semester the forecast treats the current CGPA as 0.0.
    #[must_use]
    pub fn compute(profile: &StudentProfile, records: &[SemesterRecord], total_semesters: u8) -> Self {
        let current = profile.current_semester.number();
        let cgpa = cgpa(records).ok();
        let (best_semester, worst_semester) = best_worst(records);

        let mut ordered: Vec<&SemesterRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.semester);

        Self {
            cgpa,
            best_semester,
            worst_semester,
            topper_count: topper_count(records),
            supply_count: supply_count(records),
            total_credits: ordered.iter().map(|r| r.total_credits).collect(),
            earned_credits: ordered.iter().map(|r| r.earned_credits).collect(),
            yearback_required: backlog_deficit(records, current),
            sgpa_required: required_future_sgpa(
                cgpa.unwrap_or(0.0),
                current,
                profile.target_cgpa,
                total_semesters,
            ),
        }
    }

    /// Summarise with the standard eight-semester programme.
    #[must_use]
    pub fn for_programme(profile: &StudentProfile, records: &[SemesterRecord]) -> Self {
        Self::compute(profile, records, MAX_SEMESTERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{SemesterLabel, SubjectGrade};

    fn sem(n: u8) -> SemesterLabel {
        SemesterLabel::new(n).unwrap()
    }

    fn credits(n: u8, total: u32, earned: u32) -> SemesterRecord {
        SemesterRecord {
            total_credits: total,
            earned_credits: earned,
            ..SemesterRecord::empty(sem(n))
        }
    }

    fn graded(n: u8, gpa: f64) -> SemesterRecord {
        SemesterRecord {
            gpa: Some(gpa),
            ..SemesterRecord::empty(sem(n))
        }
    }

    #[test]
    fn forecast_boundary_is_achievable() {
        assert_eq!(
            required_future_sgpa(8.0, 4, Some(9.0), 8),
            Some(RequiredSgpa::Needed(10.0))
        );
    }

    #[test]
    fn forecast_beyond_ten_is_not_achievable() {
        assert_eq!(
            required_future_sgpa(7.0, 6, Some(9.5), 8),
            Some(RequiredSgpa::NotAchievable)
        );
    }

    #[test]
    fn forecast_requires_target_and_remaining_semesters() {
        assert_eq!(required_future_sgpa(8.0, 4, None, 8), None);
        assert_eq!(required_future_sgpa(8.0, 4, Some(0.0), 8), None);
        assert_eq!(required_future_sgpa(8.0, 8, Some(9.0), 8), None);
    }

    #[test]
    fn forecast_rounds_to_two_places() {
        // (8.0*8 - 7.3*3) / 5 = 8.42
        assert_eq!(
            required_future_sgpa(7.3, 3, Some(8.0), 8),
            Some(RequiredSgpa::Needed(8.42))
        );
    }

    #[test]
    fn backlog_within_allowance() {
        let records = [credits(1, 20, 20), credits(2, 20, 10)];
        assert_eq!(backlog_deficit(&records, 3), 0);
    }

    #[test]
    fn backlog_beyond_first_allowance() {
        let records = [credits(1, 22, 10), credits(2, 21, 11)];
        // 12 + 10 failed credits, allowance 17
        assert_eq!(backlog_deficit(&records, 4), 5);
    }

    #[test]
    fn backlog_second_checkpoint_uses_four_semesters() {
        let records = [
            credits(1, 20, 10),
            credits(2, 20, 10),
            credits(3, 20, 5),
            credits(4, 20, 5),
            credits(5, 20, 0),
        ];
        // 10 + 10 + 15 + 15 = 50 failed in semesters 1-4, allowance 41
        assert_eq!(backlog_deficit(&records, 5), 9);
        assert_eq!(backlog_deficit(&records, 6), 9);
        assert_eq!(backlog_deficit(&records, 7), 0);
    }

    #[test]
    fn backlog_ignores_record_order() {
        let records = [credits(3, 20, 0), credits(2, 20, 0), credits(1, 20, 0)];
        // Only semesters 1-2 count at semester 3: 40 - 17
        assert_eq!(backlog_deficit(&records, 3), 23);
    }

    #[test]
    fn best_and_worst() {
        assert_eq!(best_worst(&[]), (0.0, 0.0));
        let records = [graded(1, 7.5), SemesterRecord::empty(sem(2)), graded(3, 9.1)];
        assert_eq!(best_worst(&records), (9.1, 7.5));
    }

    #[test]
    fn grade_counts_include_electives() {
        let mut record = SemesterRecord::empty(sem(3));
        record.subjects = vec![
            SubjectGrade::new("a".into(), 4, Grade::S),
            SubjectGrade::new("b".into(), 4, Grade::F),
            SubjectGrade::new("c".into(), 4, Grade::S),
        ];
        record.minor_subjects = vec![SubjectGrade::new("m".into(), 4, Grade::F)];
        let records = [record];
        assert_eq!(topper_count(&records), 2);
        assert_eq!(supply_count(&records), 2);
    }

    #[test]
    fn summary_without_grades() {
        let profile = StudentProfile::new("s".into(), "CSE".into(), sem(2)).with_target(6.0);
        let summary = ProgressSummary::for_programme(&profile, &[]);
        assert!(summary.cgpa.is_none());
        assert_eq!(summary.best_semester, 0.0);
        // (6*8 - 0*2) / 6 = 8.0
        assert_eq!(summary.sgpa_required, Some(RequiredSgpa::Needed(8.0)));
    }

    #[test]
    fn summary_orders_credit_lists() {
        let profile = StudentProfile::new("s".into(), "CSE".into(), sem(3));
        let mut second = credits(2, 21, 21);
        second.gpa = Some(8.0);
        let mut first = credits(1, 20, 16);
        first.gpa = Some(6.0);
        let summary = ProgressSummary::for_programme(&profile, &[second, first]);
        assert_eq!(summary.total_credits, vec![20, 21]);
        assert_eq!(summary.earned_credits, vec![16, 21]);
        assert_eq!(summary.cgpa, Some(7.0));
        assert_eq!(summary.sgpa_required, None);
    }

    #[test]
    fn display_sentinel() {
        assert_eq!(RequiredSgpa::NotAchievable.to_string(), "not achievable");
        assert_eq!(RequiredSgpa::Needed(8.5).to_string(), "8.50");
    }
}
