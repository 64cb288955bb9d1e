use std::sync::Arc;

use storage::repository::StudentRepository;
use swim_core::model::{Gender, Student, StudentDraft, StudentId};
use tracing::{debug, info};

use crate::Clock;
use crate::error::StudentServiceError;

/// Enrollment seeded into an empty student list: (name, grade, gender, contact, age).
const DEFAULT_STUDENTS: [(&str, u8, Gender, &str, u8); 15] = [
    ("Elizabeth", 1, Gender::Female, "123456", 4),
    ("Amaka", 2, Gender::Female, "1234567", 5),
    ("Chibuzor", 3, Gender::Male, "1234566", 6),
    ("Jake", 4, Gender::Male, "1234567", 7),
    ("John", 5, Gender::Male, "1234567", 8),
    ("Mary", 1, Gender::Female, "1234568", 8),
    ("Michael", 2, Gender::Male, "1234569", 9),
    ("Sarah", 3, Gender::Female, "1234570", 10),
    ("David", 4, Gender::Male, "1234571", 11),
    ("Jennifer", 5, Gender::Female, "1234572", 7),
    ("Daniel", 1, Gender::Male, "1234573", 8),
    ("Jessica", 2, Gender::Female, "1234574", 9),
    ("Joseph", 3, Gender::Male, "1234575", 10),
    ("Sophia", 4, Gender::Female, "1234576", 11),
    ("Ethan", 5, Gender::Male, "1234577", 7),
];

/// Registration and login for enrolled students.
#[derive(Clone)]
pub struct StudentService {
    clock: Clock,
    students: Arc<dyn StudentRepository>,
}

impl StudentService {
    #[must_use]
    pub fn new(clock: Clock, students: Arc<dyn StudentRepository>) -> Self {
        Self { clock, students }
    }

    /// Validate and persist a new student.
    ///
    /// # Errors
    ///
    /// Returns `StudentServiceError::Student` for validation failures.
    /// Returns `StudentServiceError::Storage` if persistence fails.
    pub async fn register(&self, draft: StudentDraft) -> Result<Student, StudentServiceError> {
        let validated = draft.validate(self.clock.now())?;
        let student = self.students.insert_new_student(validated).await?;
        info!(student_id = %student.id(), grade = student.grade().rank(), "registered student");
        Ok(student)
    }

    /// Look a student up by id.
    ///
    /// Returns `Ok(None)` when no such student is enrolled.
    ///
    /// # Errors
    ///
    /// Returns `StudentServiceError::Storage` if repository access fails.
    pub async fn login(&self, id: StudentId) -> Result<Option<Student>, StudentServiceError> {
        let student = self.students.get_student(id).await?;
        debug!(student_id = %id, found = student.is_some(), "student login");
        Ok(student)
    }

    /// # Errors
    ///
    /// Returns `StudentServiceError::Storage` if repository access fails.
    pub async fn list(&self) -> Result<Vec<Student>, StudentServiceError> {
        Ok(self.students.list_students().await?)
    }

    /// Seed the default enrollment when no students exist.
    ///
    /// Returns the number of students added.
    ///
    /// # Errors
    ///
    /// Returns `StudentServiceError` if a seed record fails validation or
    /// persistence.
    pub async fn ensure_default_students(&self) -> Result<usize, StudentServiceError> {
        if !self.students.list_students().await?.is_empty() {
            return Ok(0);
        }
        let now = self.clock.now();
        for (name, grade_rank, gender, contact, age) in DEFAULT_STUDENTS {
            let draft = StudentDraft {
                name: name.to_owned(),
                gender,
                age,
                emergency_contact: contact.to_owned(),
                grade_rank,
            };
            self.students
                .insert_new_student(draft.validate(now)?)
                .await?;
        }
        info!(students = DEFAULT_STUDENTS.len(), "seeded default students");
        Ok(DEFAULT_STUDENTS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use swim_core::model::{Grade, StudentError};
    use swim_core::time::fixed_clock;

    fn service() -> StudentService {
        StudentService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    fn draft(name: &str, age: u8) -> StudentDraft {
        StudentDraft {
            name: name.into(),
            gender: Gender::Male,
            age,
            emergency_contact: "555".into(),
            grade_rank: 3,
        }
    }

    #[tokio::test]
    async fn register_assigns_next_id() {
        let service = service();
        service.ensure_default_students().await.unwrap();

        let student = service.register(draft("Tobi", 6)).await.unwrap();
        assert_eq!(student.id(), StudentId::new(16));
        assert_eq!(student.grade(), Grade::Three);
    }

    #[tokio::test]
    async fn register_rejects_invalid_age() {
        let service = service();
        let err = service.register(draft("Tobi", 15)).await.unwrap_err();
        assert!(matches!(
            err,
            StudentServiceError::Student(StudentError::InvalidAge(15))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_finds_registered_students_only() {
        let service = service();
        service.ensure_default_students().await.unwrap();

        let jake = service.login(StudentId::new(4)).await.unwrap().unwrap();
        assert_eq!(jake.name(), "Jake");
        assert!(service.login(StudentId::new(40)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn default_students_are_seeded_once() {
        let service = service();
        assert_eq!(service.ensure_default_students().await.unwrap(), 15);
        assert_eq!(service.ensure_default_students().await.unwrap(), 0);
        assert_eq!(service.list().await.unwrap().len(), 15);
    }
}
