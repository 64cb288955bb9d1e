use swim_core::model::{Student, StudentId, ValidatedStudent};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_student_row, student_id_from_i64};
use crate::repository::{StorageError, StudentRepository};

const STUDENT_COLUMNS: &str =
    "SELECT id, name, gender, age, emergency_contact, grade, registered_at FROM students";

#[async_trait::async_trait]
impl StudentRepository for SqliteRepository {
    async fn insert_new_student(
        &self,
        student: ValidatedStudent,
    ) -> Result<Student, StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let next: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) + 1 FROM students")
            .fetch_one(&mut *tx)
            .await
            .map_err(conn)?;
        let student = student.assign_id(student_id_from_i64(next)?);

        sqlx::query(
            r"
            INSERT INTO students (id, name, gender, age, emergency_contact, grade, registered_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(next)
        .bind(student.name().to_owned())
        .bind(student.gender().as_str())
        .bind(i64::from(student.age()))
        .bind(student.emergency_contact().to_owned())
        .bind(i64::from(student.grade().rank()))
        .bind(student.registered_at())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        tx.commit().await.map_err(conn)?;
        Ok(student)
    }

    async fn get_student(&self, id: StudentId) -> Result<Option<Student>, StorageError> {
        let row = sqlx::query(&format!("{STUDENT_COLUMNS} WHERE id = ?1"))
            .bind(id_to_i64("student_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_student_row).transpose()
    }

    async fn list_students(&self) -> Result<Vec<Student>, StorageError> {
        let rows = sqlx::query(&format!("{STUDENT_COLUMNS} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(map_student_row).collect()
    }
}
