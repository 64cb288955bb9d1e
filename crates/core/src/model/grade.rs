use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("grade must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

//
// ─── GRADE ────────────────────────────────────────────────────────────────────
//

/// Swimming skill level, shared by lessons and students.
///
/// Variants are declared lowest to highest; `Grade::ALL` keeps that order and
/// is the sequence the schedule generator indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::One,
        Grade::Two,
        Grade::Three,
        Grade::Four,
        Grade::Five,
    ];

    /// Converts a numeric rank (1-5) to a `Grade`.
    ///
    /// # Errors
    ///
    /// Returns `GradeError::OutOfRange` if the value is not in the range 1-5.
    pub fn from_rank(rank: u8) -> Result<Self, GradeError> {
        match rank {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            _ => Err(GradeError::OutOfRange(rank)),
        }
    }

    /// Underlying rank, 1 for the lowest grade.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Grade::One => 1,
            Grade::Two => 2,
            Grade::Three => 3,
            Grade::Four => 4,
            Grade::Five => 5,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade {}", self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_round_trips_for_every_grade() {
        for grade in Grade::ALL {
            assert_eq!(Grade::from_rank(grade.rank()).unwrap(), grade);
        }
    }

    #[test]
    fn from_rank_rejects_zero_and_six() {
        assert_eq!(Grade::from_rank(0).unwrap_err(), GradeError::OutOfRange(0));
        assert_eq!(Grade::from_rank(6).unwrap_err(), GradeError::OutOfRange(6));
    }

    #[test]
    fn all_is_ordered_lowest_to_highest() {
        assert!(Grade::ALL.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(Grade::ALL[4], Grade::Five);
    }

    #[test]
    fn display_uses_rank() {
        assert_eq!(Grade::Three.to_string(), "Grade 3");
    }
}
