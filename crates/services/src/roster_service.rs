use std::sync::Arc;

use storage::repository::CoachRepository;
use swim_core::model::{Coach, CoachId};
use tracing::info;

use crate::error::RosterServiceError;

/// Coaches seeded into an empty roster.
pub const DEFAULT_COACHES: [&str; 4] = ["Helen", "Marcus", "Priya", "Tomasz"];

/// Owns the coach roster that lessons borrow from.
#[derive(Clone)]
pub struct RosterService {
    coaches: Arc<dyn CoachRepository>,
}

impl RosterService {
    #[must_use]
    pub fn new(coaches: Arc<dyn CoachRepository>) -> Self {
        Self { coaches }
    }

    /// Seed `DEFAULT_COACHES` when the roster is empty.
    ///
    /// Returns the number of coaches added.
    ///
    /// # Errors
    ///
    /// Returns `RosterServiceError::Storage` if repository access fails.
    pub async fn ensure_default_roster(&self) -> Result<usize, RosterServiceError> {
        if !self.coaches.list_coaches().await?.is_empty() {
            return Ok(0);
        }
        for (name, id) in DEFAULT_COACHES.into_iter().zip(1..) {
            let coach = Coach::new(CoachId::new(id), name)?;
            self.coaches.upsert_coach(&coach).await?;
        }
        info!(coaches = DEFAULT_COACHES.len(), "seeded default roster");
        Ok(DEFAULT_COACHES.len())
    }

    /// The roster in id order, each coach behind a shared handle.
    ///
    /// # Errors
    ///
    /// Returns `RosterServiceError::Storage` if repository access fails.
    pub async fn roster(&self) -> Result<Vec<Arc<Coach>>, RosterServiceError> {
        let coaches = self.coaches.list_coaches().await?;
        Ok(coaches.into_iter().map(Arc::new).collect())
    }

    /// Add or rename a coach.
    ///
    /// # Errors
    ///
    /// Returns `RosterServiceError::Coach` for an invalid name and
    /// `RosterServiceError::Storage` if persistence fails.
    pub async fn upsert_coach(
        &self,
        id: CoachId,
        name: String,
    ) -> Result<Coach, RosterServiceError> {
        let coach = Coach::new(id, name)?;
        self.coaches.upsert_coach(&coach).await?;
        Ok(coach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use swim_core::model::CoachError;

    #[tokio::test]
    async fn default_roster_is_seeded_once() {
        let service = RosterService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.ensure_default_roster().await.unwrap(), 4);
        assert_eq!(service.ensure_default_roster().await.unwrap(), 0);

        let roster = service.roster().await.unwrap();
        let names: Vec<&str> = roster.iter().map(|c| c.name()).collect();
        assert_eq!(names, DEFAULT_COACHES);
    }

    #[tokio::test]
    async fn existing_roster_is_left_alone() {
        let service = RosterService::new(Arc::new(InMemoryRepository::new()));
        service
            .upsert_coach(CoachId::new(7), "Ada".into())
            .await
            .unwrap();
        assert_eq!(service.ensure_default_roster().await.unwrap(), 0);
        assert_eq!(service.roster().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn upsert_rejects_blank_name() {
        let service = RosterService::new(Arc::new(InMemoryRepository::new()));
        let err = service
            .upsert_coach(CoachId::new(1), " ".into())
            .await
            .unwrap_err();
        assert!(matches!(err, RosterServiceError::Coach(CoachError::EmptyName)));
    }
}
