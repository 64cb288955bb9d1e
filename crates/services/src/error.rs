//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use swim_core::model::{CoachError, StudentError};
use swim_core::schedule::ScheduleError;
use swim_core::timetable::TimetableError;

/// Errors emitted by `RosterService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RosterServiceError {
    #[error(transparent)]
    Coach(#[from] CoachError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ScheduleService` and `LessonStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScheduleServiceError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Timetable(#[from] TimetableError),
    #[error("stored term has {found} lessons, expected {expected}")]
    IncompleteTerm { found: u64, expected: u64 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StudentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudentServiceError {
    #[error(transparent)]
    Student(#[from] StudentError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Roster(#[from] RosterServiceError),
    #[error(transparent)]
    Schedule(#[from] ScheduleServiceError),
    #[error(transparent)]
    Student(#[from] StudentServiceError),
}
