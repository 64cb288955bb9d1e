use std::sync::Arc;

use swim_core::model::{CoachId, Day, Lesson, LessonId};
use swim_core::query::{self, LessonFilter};
use swim_core::timetable::{SortedLessons, Timetable, WeekBoundaryMode};
use tracing::{debug, warn};

use crate::error::ScheduleServiceError;

/// The generated term, loaded once and read-only afterwards.
///
/// Cloning shares the same lessons.
#[derive(Debug, Clone)]
pub struct LessonStore {
    lessons: Arc<[Lesson]>,
}

impl LessonStore {
    #[must_use]
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self {
            lessons: lessons.into(),
        }
    }

    /// Every lesson in creation (id) order.
    #[must_use]
    pub fn all(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        query::by_id(&self.lessons, id)
    }

    #[must_use]
    pub fn on_day(&self, day: Day) -> Vec<&Lesson> {
        query::by_day(&self.lessons, day)
    }

    #[must_use]
    pub fn for_coach(&self, coach_id: CoachId) -> Vec<&Lesson> {
        query::by_coach(&self.lessons, coach_id)
    }

    #[must_use]
    pub fn for_grade(&self, rank: u8) -> Vec<&Lesson> {
        query::by_grade(&self.lessons, rank)
    }

    #[must_use]
    pub fn select(&self, filter: LessonFilter) -> Vec<&Lesson> {
        let selected = filter.apply(&self.lessons);
        debug!(?filter, matched = selected.len(), "filtered lessons");
        selected
    }

    /// Filter the store and render the result as a week-segmented timetable.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleServiceError::Timetable` if the store is not in id
    /// order, which only happens when a backend returns rows unsorted.
    pub fn render(
        &self,
        filter: LessonFilter,
        mode: WeekBoundaryMode,
    ) -> Result<String, ScheduleServiceError> {
        let sorted = SortedLessons::new(self.select(filter)).inspect_err(|err| {
            warn!(%err, "refusing to render unsorted lessons");
        })?;
        Ok(Timetable::new(mode).render(&sorted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swim_core::model::{Coach, Grade, TimeSlot};

    fn store_with_ids(ids: &[u64]) -> LessonStore {
        let coach = Arc::new(Coach::new(CoachId::new(1), "Helen").unwrap());
        LessonStore::new(
            ids.iter()
                .map(|&id| {
                    Lesson::new(
                        LessonId::new(id),
                        Grade::Two,
                        Day::Friday,
                        TimeSlot::SixToSevenPm,
                        Arc::clone(&coach),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn render_rejects_backend_disorder() {
        let store = store_with_ids(&[2, 1]);
        let err = store
            .render(LessonFilter::All, WeekBoundaryMode::Legacy)
            .unwrap_err();
        assert!(matches!(err, ScheduleServiceError::Timetable(_)));
    }

    #[test]
    fn render_of_empty_selection_is_empty() {
        let store = store_with_ids(&[1, 2, 3]);
        let text = store
            .render(LessonFilter::Day(Day::Monday), WeekBoundaryMode::Legacy)
            .unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn clones_share_lessons() {
        let store = store_with_ids(&[1]);
        let copy = store.clone();
        assert!(std::ptr::eq(store.all(), copy.all()));
    }
}
