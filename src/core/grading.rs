//! Grade scale: letter grades, their grade-points, and the marks-to-letter bands.

use super::error::{GpaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest raw mark accepted by [`letter_from_marks`].
pub const MAX_MARKS: f64 = 150.0;

/// Highest grade-point any subject can earn.
pub const MAX_GRADE_POINT: f64 = 10.0;

/// A letter grade from the grade-point table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 10 points
    #[serde(rename = "S")]
    S,
    /// 9 points
    #[serde(rename = "A+")]
    APlus,
    /// 8.5 points
    #[serde(rename = "A")]
    A,
    /// 8 points
    #[serde(rename = "B+")]
    BPlus,
    /// 7.5 points
    #[serde(rename = "B")]
    B,
    /// 7 points
    #[serde(rename = "C+")]
    CPlus,
    /// 6.5 points
    #[serde(rename = "C")]
    C,
    /// 6 points
    #[serde(rename = "D+")]
    DPlus,
    /// Pass, 5.5 points
    #[serde(rename = "P")]
    P,
    /// Fail, 0 points; credits are not earned
    #[serde(rename = "F")]
    F,
}

/// Lower bound (inclusive) of each marks band, highest first.
const MARK_BANDS: [(f64, Grade); 9] = [
    (135.0, Grade::S),
    (127.5, Grade::APlus),
    (120.0, Grade::A),
    (112.5, Grade::BPlus),
    (105.0, Grade::B),
    (97.5, Grade::CPlus),
    (90.0, Grade::C),
    (82.5, Grade::DPlus),
    (75.0, Grade::P),
];

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Self; 10] = [
        Self::S,
        Self::APlus,
        Self::A,
        Self::BPlus,
        Self::B,
        Self::CPlus,
        Self::C,
        Self::DPlus,
        Self::P,
        Self::F,
    ];

    /// Grade-point value of this letter.
    #[must_use]
    pub const fn point(self) -> f64 {
        match self {
            Self::S => 10.0,
            Self::APlus => 9.0,
            Self::A => 8.5,
            Self::BPlus => 8.0,
            Self::B => 7.5,
            Self::CPlus => 7.0,
            Self::C => 6.5,
            Self::DPlus => 6.0,
            Self::P => 5.5,
            Self::F => 0.0,
        }
    }

    /// Whether credits for this grade count as earned.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        !matches!(self, Self::F)
    }

    /// The letter as written on a grade sheet.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DPlus => "D+",
            Self::P => "P",
            Self::F => "F",
        }
    }

    /// Parse a letter, attributing a failure to `subject`.
    ///
    /// # Errors
    /// Returns [`GpaError::InvalidGrade`] for letters outside the table.
    pub fn parse_for(letter: &str, subject: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == letter.trim())
            .ok_or_else(|| GpaError::InvalidGrade {
                subject: subject.to_string(),
                grade: letter.to_string(),
            })
    }
}

impl FromStr for Grade {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_for(s, "")
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade-point for a letter.
///
/// # Errors
/// Unknown letters are rejected, never scored as zero.
pub fn grade_point(letter: &str) -> Result<f64> {
    letter.parse::<Grade>().map(Grade::point)
}

/// Convert raw marks (0–150) to a letter grade.
///
/// # Errors
/// Returns [`GpaError::MarksOutOfRange`] when marks are negative, above 150, or NaN.
pub fn letter_from_marks(marks: f64) -> Result<Grade> {
    if !(0.0..=MAX_MARKS).contains(&marks) {
        return Err(GpaError::MarksOutOfRange(marks));
    }
    Ok(MARK_BANDS
        .iter()
        .find(|(floor, _)| marks >= *floor)
        .map_or(Grade::F, |(_, grade)| *grade))
}

/// Round to two decimal places for display.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_table() {
        let expected = [10.0, 9.0, 8.5, 8.0, 7.5, 7.0, 6.5, 6.0, 5.5, 0.0];
        for (grade, points) in Grade::ALL.iter().zip(expected) {
            assert!((grade.point() - points).abs() < f64::EPSILON, "{grade}");
        }
    }

    #[test]
    fn grade_point_rejects_unknown_letters() {
        assert!((grade_point("B+").unwrap() - 8.0).abs() < f64::EPSILON);
        assert!(matches!(
            grade_point("E"),
            Err(GpaError::InvalidGrade { .. })
        ));
        assert!(grade_point("").is_err());
        assert!(grade_point("a").is_err());
    }

    #[test]
    fn coarse_d_has_no_grade_point() {
        assert!(grade_point("D").is_err());
        assert!(grade_point("D+").is_ok());
    }

    #[test]
    fn parse_for_names_subject() {
        let err = Grade::parse_for("X", "Maths").unwrap_err();
        assert!(err.to_string().contains("Maths"));
        assert_eq!(Grade::parse_for(" A+ ", "Maths").unwrap(), Grade::APlus);
    }

    #[test]
    fn marks_boundaries() {
        assert_eq!(letter_from_marks(135.0).unwrap(), Grade::S);
        assert_eq!(letter_from_marks(134.9).unwrap(), Grade::APlus);
        assert_eq!(letter_from_marks(134.999).unwrap(), Grade::APlus);
        assert_eq!(letter_from_marks(150.0).unwrap(), Grade::S);
        assert_eq!(letter_from_marks(0.0).unwrap(), Grade::F);
        assert_eq!(letter_from_marks(74.99).unwrap(), Grade::F);
        assert_eq!(letter_from_marks(75.0).unwrap(), Grade::P);
        assert_eq!(letter_from_marks(82.5).unwrap(), Grade::DPlus);
        assert_eq!(letter_from_marks(97.5).unwrap(), Grade::CPlus);
        assert_eq!(letter_from_marks(112.5).unwrap(), Grade::BPlus);
        assert_eq!(letter_from_marks(120.0).unwrap(), Grade::A);
    }

    #[test]
    fn marks_bands_cover_range_in_order() {
        // Walk 0..=150 in quarter marks: letters never improve as marks drop.
        let mut previous = Grade::S;
        let mut seen = Vec::new();
        for step in (0..=600).rev() {
            let grade = letter_from_marks(f64::from(step) / 4.0).unwrap();
            assert!(grade.point() <= previous.point());
            if !seen.contains(&grade) {
                seen.push(grade);
            }
            previous = grade;
        }
        assert_eq!(seen, Grade::ALL.to_vec());
    }

    #[test]
    fn marks_out_of_range() {
        assert!(matches!(
            letter_from_marks(-0.5),
            Err(GpaError::MarksOutOfRange(_))
        ));
        assert!(letter_from_marks(150.01).is_err());
        assert!(letter_from_marks(f64::NAN).is_err());
    }

    #[test]
    fn round_two_places() {
        assert!((round2(7.456) - 7.46).abs() < 1e-12);
        assert!((round2(8.0) - 8.0).abs() < 1e-12);
    }
}
