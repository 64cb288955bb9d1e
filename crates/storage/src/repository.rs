use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use swim_core::model::{
    Coach, CoachId, Day, Grade, Lesson, LessonId, Student, StudentId, TimeSlot, ValidatedStudent,
};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a lesson.
///
/// Lessons are stored with their coach id only; the roster owns the coach and
/// is re-attached when the record is turned back into a `Lesson`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRecord {
    pub id: LessonId,
    pub grade: Grade,
    pub day: Day,
    pub time: TimeSlot,
    pub coach_id: CoachId,
}

impl LessonRecord {
    #[must_use]
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id(),
            grade: lesson.grade(),
            day: lesson.day(),
            time: lesson.time(),
            coach_id: lesson.coach().id(),
        }
    }

    /// Convert the record back into a domain `Lesson`, sharing the roster's coach.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the coach is not on the roster.
    pub fn into_lesson(self, roster: &HashMap<CoachId, Arc<Coach>>) -> Result<Lesson, StorageError> {
        let coach = roster.get(&self.coach_id).ok_or_else(|| {
            StorageError::Serialization(format!(
                "lesson {} references unknown coach {}",
                self.id, self.coach_id
            ))
        })?;
        Ok(Lesson::new(
            self.id,
            self.grade,
            self.day,
            self.time,
            Arc::clone(coach),
        ))
    }
}

/// Repository contract for the coach roster.
#[async_trait]
pub trait CoachRepository: Send + Sync {
    /// Persist or update a coach.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the coach cannot be stored.
    async fn upsert_coach(&self, coach: &Coach) -> Result<(), StorageError>;

    /// Fetch a coach by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures; a missing coach is `Ok(None)`.
    async fn get_coach(&self, id: CoachId) -> Result<Option<Coach>, StorageError>;

    /// List the roster ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn list_coaches(&self) -> Result<Vec<Coach>, StorageError>;
}

/// Repository contract for the generated lesson store.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Store a freshly generated term.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if lessons already exist; the store is
    /// written once.
    async fn insert_term(&self, lessons: &[Lesson]) -> Result<(), StorageError>;

    /// Number of stored lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn count_lessons(&self) -> Result<u64, StorageError>;

    /// All lessons, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn list_lessons(&self) -> Result<Vec<LessonRecord>, StorageError>;
}

/// Repository contract for enrolled students.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persist a validated student, assigning the next sequential ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the student cannot be stored.
    async fn insert_new_student(&self, student: ValidatedStudent)
    -> Result<Student, StorageError>;

    /// Fetch a student by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures; a missing student is `Ok(None)`.
    async fn get_student(&self, id: StudentId) -> Result<Option<Student>, StorageError>;

    /// List students ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn list_students(&self) -> Result<Vec<Student>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    coaches: Arc<Mutex<BTreeMap<CoachId, Coach>>>,
    lessons: Arc<Mutex<Vec<LessonRecord>>>,
    students: Arc<Mutex<BTreeMap<StudentId, Student>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl CoachRepository for InMemoryRepository {
    async fn upsert_coach(&self, coach: &Coach) -> Result<(), StorageError> {
        let mut guard = self.coaches.lock().map_err(poisoned)?;
        guard.insert(coach.id(), coach.clone());
        Ok(())
    }

    async fn get_coach(&self, id: CoachId) -> Result<Option<Coach>, StorageError> {
        let guard = self.coaches.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_coaches(&self) -> Result<Vec<Coach>, StorageError> {
        let guard = self.coaches.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn insert_term(&self, lessons: &[Lesson]) -> Result<(), StorageError> {
        let mut guard = self.lessons.lock().map_err(poisoned)?;
        if !guard.is_empty() {
            return Err(StorageError::Conflict);
        }
        guard.extend(lessons.iter().map(LessonRecord::from_lesson));
        guard.sort_by_key(|record| record.id);
        Ok(())
    }

    async fn count_lessons(&self) -> Result<u64, StorageError> {
        let guard = self.lessons.lock().map_err(poisoned)?;
        Ok(guard.len() as u64)
    }

    async fn list_lessons(&self) -> Result<Vec<LessonRecord>, StorageError> {
        let guard = self.lessons.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn insert_new_student(
        &self,
        student: ValidatedStudent,
    ) -> Result<Student, StorageError> {
        let mut guard = self.students.lock().map_err(poisoned)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let student = student.assign_id(StudentId::new(next));
        guard.insert(student.id(), student.clone());
        Ok(student)
    }

    async fn get_student(&self, id: StudentId) -> Result<Option<Student>, StorageError> {
        let guard = self.students.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_students(&self) -> Result<Vec<Student>, StorageError> {
        let guard = self.students.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub coaches: Arc<dyn CoachRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub students: Arc<dyn StudentRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let coaches: Arc<dyn CoachRepository> = Arc::new(repo.clone());
        let lessons: Arc<dyn LessonRepository> = Arc::new(repo.clone());
        let students: Arc<dyn StudentRepository> = Arc::new(repo);
        Self {
            coaches,
            lessons,
            students,
        }
    }
}
