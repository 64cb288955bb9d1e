use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::model::ids::CoachId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoachError {
    #[error("coach name cannot be empty")]
    EmptyName,
}

/// An instructor on the roster.
///
/// Lessons hold coaches behind an `Arc`; the roster owns them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Coach {
    id: CoachId,
    name: String,
}

impl Coach {
    /// Creates a new Coach.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::EmptyName` if name is empty or whitespace-only.
    pub fn new(id: CoachId, name: impl Into<String>) -> Result<Self, CoachError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(CoachError::EmptyName);
        }
        Ok(Self {
            id,
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> CoachId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Coach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coach_rejects_blank_name() {
        let err = Coach::new(CoachId::new(1), "  ").unwrap_err();
        assert_eq!(err, CoachError::EmptyName);
    }

    #[test]
    fn coach_trims_name() {
        let coach = Coach::new(CoachId::new(2), "  Helen  ").unwrap();
        assert_eq!(coach.name(), "Helen");
        assert_eq!(coach.to_string(), "Helen (#2)");
    }
}
