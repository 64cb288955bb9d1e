use std::sync::Arc;

use rand::Rng;
use thiserror::Error;

use crate::model::{Coach, Day, Grade, LESSONS_PER_WEEK, Lesson, LessonId, TERM_WEEKS, TimeSlot};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("cannot generate a term without coaches")]
    EmptyRoster,
    #[error("coach policy picked index {index} from a roster of {len}")]
    CoachOutOfRange { index: usize, len: usize },
}

//
// ─── GRADE CURSOR ──────────────────────────────────────────────────────────────
//

/// Index into `Grade::ALL` that walks downwards and wraps to the top.
///
/// One cursor is shared by the whole generation run; it is never reset at
/// week or day boundaries, so grades drift across days from week to week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeCursor {
    index: usize,
}

impl GradeCursor {
    const TOP: usize = Grade::ALL.len() - 1;

    #[must_use]
    pub fn new() -> Self {
        Self { index: Self::TOP }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Grade {
        Grade::ALL[self.index]
    }

    /// Returns the current grade, then steps the cursor down.
    pub fn advance(&mut self) -> Grade {
        let grade = self.current();
        self.index = self.index.checked_sub(1).unwrap_or(Self::TOP);
        grade
    }
}

impl Default for GradeCursor {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── COACH POLICY ──────────────────────────────────────────────────────────────
//

/// Chooses which roster entry teaches a slot.
///
/// Implementations receive the slot being filled but are not required to use
/// it; no exclusivity between slots is implied.
pub trait CoachPolicy {
    /// Returns an index in `0..roster_len`. `roster_len` is never zero.
    fn pick(&mut self, roster_len: usize, day: Day, time: TimeSlot) -> usize;
}

/// Uniform, independent draw per slot. The same coach may land on any number
/// of slots.
#[derive(Debug, Clone)]
pub struct RandomCoach<R> {
    rng: R,
}

impl<R: Rng> RandomCoach<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CoachPolicy for RandomCoach<R> {
    fn pick(&mut self, roster_len: usize, _day: Day, _time: TimeSlot) -> usize {
        self.rng.random_range(0..roster_len)
    }
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Number of lessons one term produces.
pub const TERM_LESSONS: u64 = LESSONS_PER_WEEK * TERM_WEEKS;

/// Generate a full term of lessons.
///
/// The day/time pattern repeats `TERM_WEEKS` times over `Day::ALL`, each day
/// using its own slot pattern. Ids are assigned 1.. in creation order, grades
/// come from a single [`GradeCursor`] and coaches from `policy`.
///
/// # Errors
///
/// Returns `ScheduleError::EmptyRoster` when `coaches` is empty, and
/// `ScheduleError::CoachOutOfRange` if `policy` returns an invalid index.
pub fn generate<P: CoachPolicy + ?Sized>(
    coaches: &[Arc<Coach>],
    policy: &mut P,
) -> Result<Vec<Lesson>, ScheduleError> {
    if coaches.is_empty() {
        return Err(ScheduleError::EmptyRoster);
    }

    let mut lessons = Vec::with_capacity(usize::try_from(TERM_LESSONS).unwrap_or_default());
    let mut cursor = GradeCursor::new();

    for _week in 0..TERM_WEEKS {
        for day in Day::ALL {
            for &time in day.slots() {
                let index = policy.pick(coaches.len(), day, time);
                let coach = coaches
                    .get(index)
                    .ok_or(ScheduleError::CoachOutOfRange {
                        index,
                        len: coaches.len(),
                    })?;
                let id = LessonId::new(lessons.len() as u64 + 1);
                lessons.push(Lesson::new(
                    id,
                    cursor.advance(),
                    day,
                    time,
                    Arc::clone(coach),
                ));
            }
        }
    }

    Ok(lessons)
}

/// [`generate`] with the default uniform coach draw.
///
/// # Errors
///
/// Returns `ScheduleError::EmptyRoster` when `coaches` is empty.
pub fn generate_term<R: Rng>(coaches: &[Arc<Coach>], rng: R) -> Result<Vec<Lesson>, ScheduleError> {
    generate(coaches, &mut RandomCoach::new(rng))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoachId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn roster(n: u64) -> Vec<Arc<Coach>> {
        (1..=n)
            .map(|id| Arc::new(Coach::new(CoachId::new(id), format!("Coach {id}")).unwrap()))
            .collect()
    }

    fn term(seed: u64) -> Vec<Lesson> {
        generate_term(&roster(4), StdRng::seed_from_u64(seed)).unwrap()
    }

    struct FixedCoach(usize);

    impl CoachPolicy for FixedCoach {
        fn pick(&mut self, _roster_len: usize, _day: Day, _time: TimeSlot) -> usize {
            self.0
        }
    }

    #[test]
    fn grade_cursor_starts_at_top_and_wraps() {
        let mut cursor = GradeCursor::new();
        let seen: Vec<Grade> = (0..6).map(|_| cursor.advance()).collect();
        assert_eq!(
            seen,
            vec![
                Grade::Five,
                Grade::Four,
                Grade::Three,
                Grade::Two,
                Grade::One,
                Grade::Five
            ]
        );
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn generate_rejects_empty_roster() {
        let err = generate_term(&[], StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, ScheduleError::EmptyRoster);
    }

    #[test]
    fn generate_yields_44_gap_free_ascending_ids() {
        let lessons = term(7);
        assert_eq!(lessons.len(), 44);
        for (idx, lesson) in lessons.iter().enumerate() {
            assert_eq!(lesson.id().value(), idx as u64 + 1);
        }
    }

    #[test]
    fn generate_fills_each_day_pattern_four_times() {
        let lessons = term(11);
        let mut per_day: HashMap<Day, usize> = HashMap::new();
        for lesson in &lessons {
            *per_day.entry(lesson.day()).or_default() += 1;
            assert!(lesson.day().slots().contains(&lesson.time()));
        }
        assert_eq!(per_day[&Day::Monday], 12);
        assert_eq!(per_day[&Day::Wednesday], 12);
        assert_eq!(per_day[&Day::Friday], 12);
        assert_eq!(per_day[&Day::Saturday], 8);
    }

    #[test]
    fn generate_walks_days_then_slots_in_order() {
        let lessons = term(3);
        let week_one: Vec<(Day, TimeSlot)> =
            lessons[..11].iter().map(|l| (l.day(), l.time())).collect();
        assert_eq!(
            week_one,
            vec![
                (Day::Monday, TimeSlot::FourToFivePm),
                (Day::Monday, TimeSlot::FiveToSixPm),
                (Day::Monday, TimeSlot::SixToSevenPm),
                (Day::Wednesday, TimeSlot::FourToFivePm),
                (Day::Wednesday, TimeSlot::FiveToSixPm),
                (Day::Wednesday, TimeSlot::SixToSevenPm),
                (Day::Friday, TimeSlot::FourToFivePm),
                (Day::Friday, TimeSlot::FiveToSixPm),
                (Day::Friday, TimeSlot::SixToSevenPm),
                (Day::Saturday, TimeSlot::TwoToThreePm),
                (Day::Saturday, TimeSlot::ThreeToFourPm),
            ]
        );
        // the pattern repeats unchanged each week
        for week in lessons.chunks(11) {
            let pattern: Vec<(Day, TimeSlot)> = week.iter().map(|l| (l.day(), l.time())).collect();
            assert_eq!(pattern, week_one);
        }
    }

    #[test]
    fn grade_distribution_is_nine_nine_nine_nine_eight() {
        let lessons = term(42);
        let mut counts: HashMap<Grade, usize> = HashMap::new();
        for lesson in &lessons {
            *counts.entry(lesson.grade()).or_default() += 1;
        }
        assert_eq!(counts[&Grade::Five], 9);
        assert_eq!(counts[&Grade::Four], 9);
        assert_eq!(counts[&Grade::Three], 9);
        assert_eq!(counts[&Grade::Two], 9);
        assert_eq!(counts[&Grade::One], 8);
    }

    #[test]
    fn grade_cursor_is_not_reset_between_weeks() {
        let lessons = term(5);
        assert_eq!(lessons[0].grade(), Grade::Five);
        // 11 lessons into the term the cursor has moved 11 steps: 11 % 5 == 1
        assert_eq!(lessons[11].grade(), Grade::Four);
        assert_eq!(lessons[22].grade(), Grade::Three);
        assert_eq!(lessons[43].grade(), Grade::Two);
    }

    #[test]
    fn grades_do_not_depend_on_coach_draws() {
        let a: Vec<Grade> = term(1).iter().map(Lesson::grade).collect();
        let b: Vec<Grade> = term(99).iter().map(Lesson::grade).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn single_coach_roster_teaches_every_lesson() {
        let coaches = roster(1);
        let lessons = generate_term(&coaches, StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(lessons.len(), 44);
        assert!(lessons.iter().all(|l| Arc::ptr_eq(l.coach(), &coaches[0])));
    }

    #[test]
    fn same_seed_draws_same_coaches() {
        let a: Vec<_> = term(2024).iter().map(|l| l.coach().id()).collect();
        let b: Vec<_> = term(2024).iter().map(|l| l.coach().id()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_policy_is_honoured() {
        let coaches = roster(3);
        let lessons = generate(&coaches, &mut FixedCoach(2)).unwrap();
        assert!(lessons.iter().all(|l| l.coach().id() == CoachId::new(3)));
    }

    #[test]
    fn out_of_range_policy_is_reported() {
        let coaches = roster(2);
        let err = generate(&coaches, &mut FixedCoach(5)).unwrap_err();
        assert_eq!(err, ScheduleError::CoachOutOfRange { index: 5, len: 2 });
    }
}
