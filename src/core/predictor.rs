//! Final-CGPA prediction from grade distribution and study habits.
//!
//! Predictors sit behind [`CgpaPredictor`] so a fitted model can replace the
//! shipped [`LinearBaseline`] without touching callers. Inputs are validated
//! the same way regardless of implementation.

use super::error::{GpaError, Result};
use super::grading::{round2, Grade};
use super::models::SemesterRecord;
use serde::{Deserialize, Serialize};

/// Lowest CGPA a prediction may report.
pub const MIN_PREDICTED_CGPA: f64 = 5.0;

/// Highest CGPA a prediction may report.
pub const MAX_PREDICTED_CGPA: f64 = 10.0;

/// Grade counts bucketed by leading letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    /// S grades
    pub s: u32,
    /// A+ and A
    pub a: u32,
    /// B+ and B
    pub b: u32,
    /// C+ and C
    pub c: u32,
    /// D+ and P
    pub d: u32,
    /// F grades
    pub f: u32,
}

impl GradeDistribution {
    /// Count regular and elective grades across `records`.
    #[must_use]
    pub fn from_records(records: &[SemesterRecord]) -> Self {
        records
            .iter()
            .flat_map(SemesterRecord::all_subjects)
            .fold(Self::default(), |mut dist, subject| {
                match subject.grade {
                    Grade::S => dist.s += 1,
                    Grade::APlus | Grade::A => dist.a += 1,
                    Grade::BPlus | Grade::B => dist.b += 1,
                    Grade::CPlus | Grade::C => dist.c += 1,
                    Grade::DPlus | Grade::P => dist.d += 1,
                    Grade::F => dist.f += 1,
                }
                dist
            })
    }
}

/// The thirteen model inputs, in model order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionFeatures {
    /// Grade counts
    pub grades: GradeDistribution,
    /// Self-reported weekly study hours, 0 to 25
    pub study_hours_per_week: f64,
    /// Takes part in college events
    pub participated_in_events: bool,
    /// Completed projects
    pub project_count: u32,
    /// Has done an internship
    pub internship_experience: bool,
    /// One-way commute in minutes
    pub travel_time_minutes: u32,
    /// Lives in a PG or hostel
    pub lives_in_pg_or_hostel: bool,
    /// CGPA from the previous board, 5 to 10
    pub previous_board_cgpa: f64,
}

impl Default for PredictionFeatures {
    fn default() -> Self {
        Self {
            grades: GradeDistribution::default(),
            study_hours_per_week: 12.0,
            participated_in_events: false,
            project_count: 0,
            internship_experience: false,
            travel_time_minutes: 30,
            lives_in_pg_or_hostel: false,
            previous_board_cgpa: 8.0,
        }
    }
}

const fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl PredictionFeatures {
    /// Defaults for everything except the grade counts
    #[must_use]
    pub fn from_distribution(grades: GradeDistribution) -> Self {
        Self {
            grades,
            ..Self::default()
        }
    }

    /// Features in model column order.
    #[must_use]
    pub fn as_array(&self) -> [f64; 13] {
        let g = &self.grades;
        [
            f64::from(g.s),
            f64::from(g.a),
            f64::from(g.b),
            f64::from(g.c),
            f64::from(g.d),
            f64::from(g.f),
            self.study_hours_per_week,
            flag(self.participated_in_events),
            f64::from(self.project_count),
            flag(self.internship_experience),
            f64::from(self.travel_time_minutes),
            flag(self.lives_in_pg_or_hostel),
            self.previous_board_cgpa,
        ]
    }

    /// Check the ranged inputs.
    ///
    /// # Errors
    /// Returns [`GpaError::InvalidFeature`] naming the first bad input.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=25.0).contains(&self.study_hours_per_week) {
            return Err(GpaError::InvalidFeature {
                feature: "study_hours_per_week",
                reason: format!("must be between 0 and 25, got {}", self.study_hours_per_week),
            });
        }
        if !(5.0..=10.0).contains(&self.previous_board_cgpa) {
            return Err(GpaError::InvalidFeature {
                feature: "previous_board_cgpa",
                reason: format!("must be between 5.0 and 10.0, got {}", self.previous_board_cgpa),
            });
        }
        Ok(())
    }
}

/// Anything that can turn features into a predicted final CGPA
pub trait CgpaPredictor {
    /// Predicted CGPA in `[5, 10]`, rounded to 2 decimals.
    ///
    /// # Errors
    /// Returns [`GpaError::InvalidFeature`] for out-of-range inputs.
    fn predict(&self, features: &PredictionFeatures) -> Result<f64>;
}

/// Fixed linear weights over the feature columns, clamped to the CGPA range.
///
/// This is a heuristic baseline, not a fitted model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearBaseline {
    weights: [f64; 13],
}

impl Default for LinearBaseline {
    fn default() -> Self {
        Self {
            // S, A, B, C, D, F, study, events, projects, internship, travel, hostel, board
            weights: [
                0.9, 0.6, 0.5, 0.6, 0.0, -0.9, 0.02, 0.02, 0.03, 0.1, -0.05, 0.0, 0.15,
            ],
        }
    }
}

impl LinearBaseline {
    /// Baseline with custom weights, in [`PredictionFeatures::as_array`] order
    #[must_use]
    pub const fn with_weights(weights: [f64; 13]) -> Self {
        Self { weights }
    }
}

impl CgpaPredictor for LinearBaseline {
    fn predict(&self, features: &PredictionFeatures) -> Result<f64> {
        features.validate()?;
        let raw: f64 = features
            .as_array()
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum();
        Ok(round2(raw.clamp(MIN_PREDICTED_CGPA, MAX_PREDICTED_CGPA)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{SemesterLabel, SubjectGrade};

    #[test]
    fn distribution_buckets_letters() {
        let mut record = SemesterRecord::empty(SemesterLabel::new(1).unwrap());
        record.subjects = [
            Grade::S,
            Grade::APlus,
            Grade::A,
            Grade::BPlus,
            Grade::C,
            Grade::DPlus,
            Grade::P,
            Grade::F,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, g)| SubjectGrade::new(format!("s{i}"), 3, g))
        .collect();
        record.minor_subjects = vec![SubjectGrade::new("m".into(), 4, Grade::S)];

        let dist = GradeDistribution::from_records(&[record]);
        assert_eq!(
            dist,
            GradeDistribution {
                s: 2,
                a: 2,
                b: 1,
                c: 1,
                d: 2,
                f: 1,
            }
        );
    }

    #[test]
    fn defaults_clamp_to_floor() {
        // 0.24 - 1.5 + 1.2 = -0.06
        let predicted = LinearBaseline::default()
            .predict(&PredictionFeatures::default())
            .unwrap();
        assert!((predicted - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strong_distribution() {
        let features = PredictionFeatures::from_distribution(GradeDistribution {
            s: 8,
            a: 3,
            ..GradeDistribution::default()
        });
        // 7.2 + 1.8 - 0.06
        let predicted = LinearBaseline::default().predict(&features).unwrap();
        assert!((predicted - 8.94).abs() < 1e-9);
    }

    #[test]
    fn output_is_capped() {
        let features = PredictionFeatures::from_distribution(GradeDistribution {
            s: 20,
            ..GradeDistribution::default()
        });
        let predicted = LinearBaseline::default().predict(&features).unwrap();
        assert!((predicted - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_inputs_rejected() {
        let baseline = LinearBaseline::default();
        let features = PredictionFeatures {
            study_hours_per_week: 26.0,
            ..PredictionFeatures::default()
        };
        assert!(matches!(
            baseline.predict(&features),
            Err(GpaError::InvalidFeature {
                feature: "study_hours_per_week",
                ..
            })
        ));

        let features = PredictionFeatures {
            previous_board_cgpa: 4.9,
            ..PredictionFeatures::default()
        };
        assert!(matches!(
            baseline.predict(&features),
            Err(GpaError::InvalidFeature {
                feature: "previous_board_cgpa",
                ..
            })
        ));

        let features = PredictionFeatures {
            study_hours_per_week: f64::NAN,
            ..PredictionFeatures::default()
        };
        assert!(baseline.predict(&features).is_err());
    }

    #[test]
    fn feature_order() {
        let features = PredictionFeatures {
            participated_in_events: true,
            lives_in_pg_or_hostel: true,
            travel_time_minutes: 45,
            ..PredictionFeatures::default()
        };
        let columns = features.as_array();
        assert_eq!(columns.len(), 13);
        assert!((columns[6] - 12.0).abs() < f64::EPSILON);
        assert!((columns[7] - 1.0).abs() < f64::EPSILON);
        assert!((columns[10] - 45.0).abs() < f64::EPSILON);
        assert!((columns[11] - 1.0).abs() < f64::EPSILON);
        assert!((columns[12] - 8.0).abs() < f64::EPSILON);
    }
}
