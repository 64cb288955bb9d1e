use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use swim_core::model::{
    CoachId, Day, Gender, Grade, LessonId, Student, StudentDraft, StudentId, TimeSlot,
};

use crate::repository::{LessonRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn coach_id_from_i64(v: i64) -> Result<CoachId, StorageError> {
    Ok(CoachId::new(i64_to_u64("coach_id", v)?))
}

pub(crate) fn lesson_id_from_i64(v: i64) -> Result<LessonId, StorageError> {
    Ok(LessonId::new(i64_to_u64("lesson_id", v)?))
}

pub(crate) fn student_id_from_i64(v: i64) -> Result<StudentId, StorageError> {
    Ok(StudentId::new(i64_to_u64("student_id", v)?))
}

/// Grades are stored as their rank, 1..=5.
pub(crate) fn grade_from_i64(value: i64) -> Result<Grade, StorageError> {
    u8::try_from(value)
        .ok()
        .and_then(|rank| Grade::from_rank(rank).ok())
        .ok_or_else(|| StorageError::Serialization(format!("invalid grade: {value}")))
}

pub(crate) fn parse_day(s: &str) -> Result<Day, StorageError> {
    s.parse::<Day>().map_err(ser)
}

pub(crate) fn parse_time_slot(s: &str) -> Result<TimeSlot, StorageError> {
    TimeSlot::from_key(s)
        .ok_or_else(|| StorageError::Serialization(format!("invalid time slot: {s}")))
}

pub(crate) fn map_lesson_row(row: &SqliteRow) -> Result<LessonRecord, StorageError> {
    let day: String = row.try_get("day").map_err(ser)?;
    let time: String = row.try_get("time_slot").map_err(ser)?;
    Ok(LessonRecord {
        id: lesson_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        grade: grade_from_i64(row.try_get::<i64, _>("grade").map_err(ser)?)?,
        day: parse_day(&day)?,
        time: parse_time_slot(&time)?,
        coach_id: coach_id_from_i64(row.try_get::<i64, _>("coach_id").map_err(ser)?)?,
    })
}

pub(crate) fn map_student_row(row: &SqliteRow) -> Result<Student, StorageError> {
    let gender: String = row.try_get("gender").map_err(ser)?;
    let gender: Gender = gender.parse().map_err(ser)?;
    let age: i64 = row.try_get("age").map_err(ser)?;
    let age = u8::try_from(age)
        .map_err(|_| StorageError::Serialization(format!("invalid age: {age}")))?;
    let grade = grade_from_i64(row.try_get::<i64, _>("grade").map_err(ser)?)?;

    let draft = StudentDraft {
        name: row.try_get("name").map_err(ser)?,
        gender,
        age,
        emergency_contact: row.try_get("emergency_contact").map_err(ser)?,
        grade_rank: grade.rank(),
    };

    Student::from_persisted(
        student_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        draft,
        row.try_get("registered_at").map_err(ser)?,
    )
    .map_err(ser)
}
