use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use swim_core::model::{Coach, CoachId};

use super::SqliteRepository;
use super::mapping::{coach_id_from_i64, conn, id_to_i64, ser};
use crate::repository::{CoachRepository, StorageError};

#[async_trait::async_trait]
impl CoachRepository for SqliteRepository {
    async fn upsert_coach(&self, coach: &Coach) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO coaches (id, name)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET name = excluded.name
            ",
        )
        .bind(id_to_i64("coach_id", coach.id().value())?)
        .bind(coach.name().to_owned())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn get_coach(&self, id: CoachId) -> Result<Option<Coach>, StorageError> {
        let row = sqlx::query("SELECT id, name FROM coaches WHERE id = ?1")
            .bind(id_to_i64("coach_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(coach_from_row).transpose()
    }

    async fn list_coaches(&self) -> Result<Vec<Coach>, StorageError> {
        let rows = sqlx::query("SELECT id, name FROM coaches ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(coach_from_row).collect()
    }
}

fn coach_from_row(row: &SqliteRow) -> Result<Coach, StorageError> {
    Coach::new(
        coach_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
    )
    .map_err(ser)
}
