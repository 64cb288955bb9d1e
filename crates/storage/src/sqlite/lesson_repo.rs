use swim_core::model::Lesson;

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_lesson_row};
use crate::repository::{LessonRecord, LessonRepository, StorageError};

#[async_trait::async_trait]
impl LessonRepository for SqliteRepository {
    async fn insert_term(&self, lessons: &[Lesson]) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
            .fetch_one(&mut *tx)
            .await
            .map_err(conn)?;
        if existing > 0 {
            return Err(StorageError::Conflict);
        }

        for lesson in lessons {
            let record = LessonRecord::from_lesson(lesson);
            sqlx::query(
                r"
                INSERT INTO lessons (id, grade, day, time_slot, coach_id)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ",
            )
            .bind(id_to_i64("lesson_id", record.id.value())?)
            .bind(i64::from(record.grade.rank()))
            .bind(record.day.as_str())
            .bind(record.time.as_str())
            .bind(id_to_i64("coach_id", record.coach_id.value())?)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn count_lessons(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        u64::try_from(count).map_err(|_| StorageError::Serialization("negative count".into()))
    }

    async fn list_lessons(&self) -> Result<Vec<LessonRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, grade, day, time_slot, coach_id
            FROM lessons
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_lesson_row).collect()
    }
}
