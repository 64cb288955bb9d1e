//! Read-only filters over the lesson store.
//!
//! Every filter is a linear scan that keeps the store's creation order, so
//! its output can be handed straight to the timetable formatter.

use crate::model::{CoachId, Day, Lesson, LessonId};

/// A single lesson filter, as selected by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonFilter {
    All,
    Day(Day),
    Coach(CoachId),
    /// Matches the grade's underlying rank (1-5).
    Grade(u8),
}

impl LessonFilter {
    #[must_use]
    pub fn matches(&self, lesson: &Lesson) -> bool {
        match *self {
            LessonFilter::All => true,
            LessonFilter::Day(day) => lesson.day() == day,
            LessonFilter::Coach(coach_id) => lesson.coach().id() == coach_id,
            LessonFilter::Grade(rank) => lesson.grade().rank() == rank,
        }
    }

    /// Applies the filter, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, lessons: &'a [Lesson]) -> Vec<&'a Lesson> {
        lessons.iter().filter(|l| self.matches(l)).collect()
    }
}

#[must_use]
pub fn by_id(lessons: &[Lesson], id: LessonId) -> Option<&Lesson> {
    lessons.iter().find(|l| l.id() == id)
}

#[must_use]
pub fn by_day(lessons: &[Lesson], day: Day) -> Vec<&Lesson> {
    LessonFilter::Day(day).apply(lessons)
}

#[must_use]
pub fn by_coach(lessons: &[Lesson], coach_id: CoachId) -> Vec<&Lesson> {
    LessonFilter::Coach(coach_id).apply(lessons)
}

#[must_use]
pub fn by_grade(lessons: &[Lesson], rank: u8) -> Vec<&Lesson> {
    LessonFilter::Grade(rank).apply(lessons)
}
