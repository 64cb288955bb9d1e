use std::fmt::Write as _;

use thiserror::Error;

use crate::model::{LESSONS_PER_WEEK, Lesson, LessonId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimetableError {
    #[error("timetable input must be ordered by id: {next:?} follows {previous:?}")]
    Unsorted { previous: LessonId, next: LessonId },
}

//
// ─── SORTED INPUT ──────────────────────────────────────────────────────────────
//

/// Lessons in strictly ascending id order.
///
/// The formatter derives week membership from id gaps, so it only accepts
/// input that has been through this check. Store order and every
/// `query` filter output already satisfy it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedLessons<'a> {
    lessons: Vec<&'a Lesson>,
}

impl<'a> SortedLessons<'a> {
    /// Collect and check the lessons.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Unsorted` on the first id that does not
    /// increase.
    pub fn new(lessons: impl IntoIterator<Item = &'a Lesson>) -> Result<Self, TimetableError> {
        let lessons: Vec<&'a Lesson> = lessons.into_iter().collect();
        if let Some(pair) = lessons.windows(2).find(|pair| pair[0].id() >= pair[1].id()) {
            return Err(TimetableError::Unsorted {
                previous: pair[0].id(),
                next: pair[1].id(),
            });
        }
        Ok(Self { lessons })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Lesson> + '_ {
        self.lessons.iter().copied()
    }
}

//
// ─── FORMATTER ─────────────────────────────────────────────────────────────────
//

/// How the formatter decides which week header to print when ids jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeekBoundaryMode {
    /// Two-level boundary check. Skips at most one empty week: after a gap of
    /// two or more empty weeks the header undercounts, and a view whose first
    /// lesson sits in week 2 is headed "Week 1".
    #[default]
    Legacy,
    /// Header always names the week the lesson's id falls in.
    Exact,
}

/// Renders lessons as week-segmented text.
///
/// Each week header is `Week N` on its own line; each lesson is followed by a
/// blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timetable {
    mode: WeekBoundaryMode,
}

impl Timetable {
    #[must_use]
    pub fn new(mode: WeekBoundaryMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn render(&self, lessons: &SortedLessons<'_>) -> String {
        match self.mode {
            WeekBoundaryMode::Legacy => render_legacy(lessons),
            WeekBoundaryMode::Exact => render_exact(lessons),
        }
    }
}

/// Render with the default (legacy) boundary handling.
#[must_use]
pub fn render(lessons: &SortedLessons<'_>) -> String {
    Timetable::default().render(lessons)
}

fn push_header(out: &mut String, week: u64) {
    let _ = writeln!(out, "Week {week}");
}

fn push_lesson(out: &mut String, lesson: &Lesson) {
    let _ = writeln!(out, "{lesson}");
    out.push('\n');
}

fn render_legacy(lessons: &SortedLessons<'_>) -> String {
    let mut out = String::new();
    let mut week_count: u64 = 0;
    let mut week_boundary: u64 = LESSONS_PER_WEEK;

    for (idx, lesson) in lessons.iter().enumerate() {
        let id = lesson.id().value();
        if id > week_boundary {
            if id > week_boundary + LESSONS_PER_WEEK {
                week_count += 2;
                week_boundary += 2 * LESSONS_PER_WEEK;
            } else {
                week_count += 1;
                week_boundary += LESSONS_PER_WEEK;
            }
            push_header(&mut out, week_count);
        } else if idx == 0 && week_count == 0 {
            week_count = 1;
            push_header(&mut out, week_count);
        }
        push_lesson(&mut out, lesson);
    }

    out
}

fn render_exact(lessons: &SortedLessons<'_>) -> String {
    let mut out = String::new();
    let mut open_week = None;

    for lesson in lessons.iter() {
        let week = lesson.week();
        if open_week != Some(week) {
            push_header(&mut out, week);
            open_week = Some(week);
        }
        push_lesson(&mut out, lesson);
    }

    out
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coach, CoachId, Day, Grade, TimeSlot};
    use std::sync::Arc;

    fn lessons(ids: impl IntoIterator<Item = u64>) -> Vec<Lesson> {
        let coach = Arc::new(Coach::new(CoachId::new(1), "Helen").unwrap());
        ids.into_iter()
            .map(|id| {
                Lesson::new(
                    LessonId::new(id),
                    Grade::Three,
                    Day::Monday,
                    TimeSlot::FourToFivePm,
                    Arc::clone(&coach),
                )
            })
            .collect()
    }

    fn headers(text: &str) -> Vec<&str> {
        text.lines().filter(|line| line.starts_with("Week ")).collect()
    }

    fn entry_count(text: &str) -> usize {
        text.lines().filter(|line| line.starts_with("Lesson #")).count()
    }

    #[test]
    fn empty_input_renders_nothing() {
        let sorted = SortedLessons::new(std::iter::empty()).unwrap();
        assert_eq!(render(&sorted), "");
        assert_eq!(Timetable::new(WeekBoundaryMode::Exact).render(&sorted), "");
    }

    #[test]
    fn single_week_gets_one_header() {
        let store = lessons(1..=11);
        let text = render(&SortedLessons::new(&store).unwrap());
        assert_eq!(headers(&text), vec!["Week 1"]);
        assert_eq!(entry_count(&text), 11);
        assert!(text.starts_with("Week 1\nLesson #1 "));
    }

    #[test]
    fn each_entry_is_followed_by_blank_line() {
        let store = lessons(1..=2);
        let text = render(&SortedLessons::new(&store).unwrap());
        let expected = format!("Week 1\n{}\n\n{}\n\n", store[0], store[1]);
        assert_eq!(text, expected);
    }

    #[test]
    fn full_term_gets_four_headers() {
        let store = lessons(1..=44);
        let text = render(&SortedLessons::new(&store).unwrap());
        assert_eq!(headers(&text), vec!["Week 1", "Week 2", "Week 3", "Week 4"]);
        assert_eq!(entry_count(&text), 44);
    }

    #[test]
    fn one_empty_week_is_skipped() {
        let store = lessons((1..=11).chain(23..=33));
        let text = render(&SortedLessons::new(&store).unwrap());
        assert_eq!(headers(&text), vec!["Week 1", "Week 3"]);
        assert_eq!(entry_count(&text), 22);

        let week_three = text.find("Week 3").unwrap();
        assert_eq!(entry_count(&text[week_three..]), 11);
    }

    #[test]
    fn legacy_mode_undercounts_after_two_empty_weeks() {
        let store = lessons([1, 40]);
        let text = render(&SortedLessons::new(&store).unwrap());
        assert_eq!(headers(&text), vec!["Week 1", "Week 3"]);
    }

    #[test]
    fn legacy_mode_heads_a_week_two_start_as_week_one() {
        let store = lessons([15, 16, 30]);
        let text = render(&SortedLessons::new(&store).unwrap());
        assert_eq!(headers(&text), vec!["Week 1", "Week 2"]);
    }

    #[test]
    fn exact_mode_names_the_real_week() {
        let timetable = Timetable::new(WeekBoundaryMode::Exact);

        let store = lessons([1, 40]);
        let text = timetable.render(&SortedLessons::new(&store).unwrap());
        assert_eq!(headers(&text), vec!["Week 1", "Week 4"]);

        let store = lessons([15, 16, 30]);
        let text = timetable.render(&SortedLessons::new(&store).unwrap());
        assert_eq!(headers(&text), vec!["Week 2", "Week 3"]);
    }

    #[test]
    fn modes_agree_on_regular_input() {
        let store = lessons((1..=11).chain(23..=33));
        let sorted = SortedLessons::new(&store).unwrap();
        assert_eq!(
            Timetable::new(WeekBoundaryMode::Legacy).render(&sorted),
            Timetable::new(WeekBoundaryMode::Exact).render(&sorted)
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let store = lessons([2, 5, 13, 20, 41]);
        let sorted = SortedLessons::new(&store).unwrap();
        assert_eq!(render(&sorted), render(&sorted));
    }

    #[test]
    fn unsorted_input_is_rejected() {
        let store = lessons([3, 2]);
        let err = SortedLessons::new(&store).unwrap_err();
        assert_eq!(
            err,
            TimetableError::Unsorted {
                previous: LessonId::new(3),
                next: LessonId::new(2),
            }
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let store = lessons([4, 4]);
        assert!(SortedLessons::new(&store).is_err());
    }
}
