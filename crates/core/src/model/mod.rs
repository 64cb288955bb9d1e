mod coach;
mod grade;
mod ids;
mod lesson;
mod slot;
mod student;

pub use ids::{CoachId, LessonId, ParseIdError, StudentId};

pub use coach::{Coach, CoachError};
pub use grade::{Grade, GradeError};
pub use lesson::{LESSONS_PER_WEEK, Lesson, TERM_WEEKS};
pub use slot::{Day, ParseDayError, TimeSlot};
pub use student::{
    ENROLLMENT_AGES, Gender, Student, StudentDraft, StudentError, ValidatedStudent,
};
