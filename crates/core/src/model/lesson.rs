use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::model::coach::Coach;
use crate::model::grade::Grade;
use crate::model::ids::LessonId;
use crate::model::slot::{Day, TimeSlot};

/// Lessons generated per term-week: 3 slots on each of 3 weekday days plus
/// 2 slots on the weekend day.
pub const LESSONS_PER_WEEK: u64 = 11;

/// Number of times the weekly pattern repeats in one term.
pub const TERM_WEEKS: u64 = 4;

/// A single scheduled lesson. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    id: LessonId,
    grade: Grade,
    day: Day,
    time: TimeSlot,
    coach: Arc<Coach>,
}

impl Lesson {
    #[must_use]
    pub fn new(id: LessonId, grade: Grade, day: Day, time: TimeSlot, coach: Arc<Coach>) -> Self {
        Self {
            id,
            grade,
            day,
            time,
            coach,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn day(&self) -> Day {
        self.day
    }

    #[must_use]
    pub fn time(&self) -> TimeSlot {
        self.time
    }

    #[must_use]
    pub fn coach(&self) -> &Arc<Coach> {
        &self.coach
    }

    /// Term-week (1-based) this lesson belongs to, derived from its id.
    #[must_use]
    pub fn week(&self) -> u64 {
        self.id.value().saturating_sub(1) / LESSONS_PER_WEEK + 1
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lesson #{} | {} {} | {} | Coach: {}",
            self.id,
            self.day,
            self.time,
            self.grade,
            self.coach.name()
        )
    }
}
