use std::collections::HashMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::{CoachRepository, LessonRepository};
use swim_core::model::{Coach, CoachId, Lesson};
use swim_core::schedule::{TERM_LESSONS, generate_term};
use tracing::{debug, info};

use super::store::LessonStore;
use crate::error::ScheduleServiceError;

/// Generates the term on first use and loads it afterwards.
#[derive(Clone)]
pub struct ScheduleService {
    coaches: Arc<dyn CoachRepository>,
    lessons: Arc<dyn LessonRepository>,
    seed: Option<u64>,
}

impl ScheduleService {
    #[must_use]
    pub fn new(coaches: Arc<dyn CoachRepository>, lessons: Arc<dyn LessonRepository>) -> Self {
        Self {
            coaches,
            lessons,
            seed: None,
        }
    }

    /// Seed coach selection so a generated term is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Return the lesson store, generating and persisting a term if none exists.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleServiceError::Schedule` if the roster is empty when a
    /// term must be generated, `ScheduleServiceError::IncompleteTerm` if the
    /// stored term is partial, and `ScheduleServiceError::Storage` on
    /// repository failures.
    pub async fn open(&self) -> Result<LessonStore, ScheduleServiceError> {
        let roster: Vec<Arc<Coach>> = self
            .coaches
            .list_coaches()
            .await?
            .into_iter()
            .map(Arc::new)
            .collect();

        let stored = self.lessons.count_lessons().await?;
        if stored == 0 {
            let term = generate_term(&roster, self.rng())?;
            self.lessons.insert_term(&term).await?;
            info!(
                lessons = term.len(),
                coaches = roster.len(),
                seeded = self.seed.is_some(),
                "generated lesson term"
            );
            return Ok(LessonStore::new(term));
        }

        if stored != TERM_LESSONS {
            return Err(ScheduleServiceError::IncompleteTerm {
                found: stored,
                expected: TERM_LESSONS,
            });
        }

        let by_id: HashMap<CoachId, Arc<Coach>> = roster
            .iter()
            .map(|coach| (coach.id(), Arc::clone(coach)))
            .collect();
        let lessons = self
            .lessons
            .list_lessons()
            .await?
            .into_iter()
            .map(|record| record.into_lesson(&by_id))
            .collect::<Result<Vec<Lesson>, _>>()?;
        debug!(lessons = lessons.len(), "loaded stored term");

        Ok(LessonStore::new(lessons))
    }
}
