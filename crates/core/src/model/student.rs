use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

use crate::model::grade::{Grade, GradeError};
use crate::model::ids::StudentId;

/// Ages the school accepts for enrollment.
pub const ENROLLMENT_AGES: RangeInclusive<u8> = 4..=11;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudentError {
    #[error("student name cannot be empty")]
    EmptyName,

    #[error("emergency contact number cannot be empty")]
    EmptyContact,

    #[error("student age must be between 4 and 11, got {0}")]
    InvalidAge(u8),

    #[error("unknown gender: {0}")]
    InvalidGender(String),

    #[error(transparent)]
    Grade(#[from] GradeError),
}

//
// ─── GENDER ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = StudentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(StudentError::InvalidGender(s.to_owned())),
        }
    }
}

//
// ─── STUDENT TYPES ─────────────────────────────────────────────────────────────
//

/// Raw registration input, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub gender: Gender,
    pub age: u8,
    pub emergency_contact: String,
    pub grade_rank: u8,
}

impl StudentDraft {
    /// Validate the draft.
    ///
    /// # Errors
    ///
    /// Returns `StudentError` when the name or contact is blank, the age is
    /// outside `ENROLLMENT_AGES`, or the grade rank is not 1-5.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedStudent, StudentError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StudentError::EmptyName);
        }
        let contact = self.emergency_contact.trim();
        if contact.is_empty() {
            return Err(StudentError::EmptyContact);
        }
        if !ENROLLMENT_AGES.contains(&self.age) {
            return Err(StudentError::InvalidAge(self.age));
        }
        let grade = Grade::from_rank(self.grade_rank)?;

        Ok(ValidatedStudent {
            name: name.to_owned(),
            grade,
            gender: self.gender,
            emergency_contact: contact.to_owned(),
            age: self.age,
            registered_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStudent {
    pub name: String,
    pub grade: Grade,
    pub gender: Gender,
    pub emergency_contact: String,
    pub age: u8,
    pub registered_at: DateTime<Utc>,
}

impl ValidatedStudent {
    #[must_use]
    pub fn assign_id(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            grade: self.grade,
            gender: self.gender,
            emergency_contact: self.emergency_contact,
            age: self.age,
            registered_at: self.registered_at,
        }
    }
}

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    id: StudentId,
    name: String,
    grade: Grade,
    gender: Gender,
    emergency_contact: String,
    age: u8,
    registered_at: DateTime<Utc>,
}

impl Student {
    /// Rehydrate a student from storage, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `StudentError` if the persisted fields no longer validate.
    pub fn from_persisted(
        id: StudentId,
        draft: StudentDraft,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, StudentError> {
        Ok(draft.validate(registered_at)?.assign_id(id))
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[must_use]
    pub fn emergency_contact(&self) -> &str {
        &self.emergency_contact
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student #{} | {} | {} | age {} | {} | contact {}",
            self.id, self.name, self.gender, self.age, self.grade, self.emergency_contact
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
