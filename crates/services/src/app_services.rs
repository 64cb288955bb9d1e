use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::error::AppServicesError;
use crate::roster_service::RosterService;
use crate::schedule::{LessonStore, ScheduleService};
use crate::student_service::StudentService;

/// Assembles app-facing services and makes sure a term exists.
#[derive(Clone)]
pub struct AppServices {
    roster: Arc<RosterService>,
    students: Arc<StudentService>,
    lessons: LessonStore,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or bootstrapping fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        seed: Option<u64>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::bootstrap(storage, clock, seed).await
    }

    /// Build services over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if bootstrapping fails.
    pub async fn in_memory(clock: Clock, seed: Option<u64>) -> Result<Self, AppServicesError> {
        Self::bootstrap(Storage::in_memory(), clock, seed).await
    }

    /// Seed the roster and enrollment when empty, then open (or generate) the term.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if any step fails.
    pub async fn bootstrap(
        storage: Storage,
        clock: Clock,
        seed: Option<u64>,
    ) -> Result<Self, AppServicesError> {
        let roster = Arc::new(RosterService::new(Arc::clone(&storage.coaches)));
        roster.ensure_default_roster().await?;

        let students = Arc::new(StudentService::new(clock, Arc::clone(&storage.students)));
        students.ensure_default_students().await?;

        let lessons = ScheduleService::new(
            Arc::clone(&storage.coaches),
            Arc::clone(&storage.lessons),
        )
        .with_seed(seed)
        .open()
        .await?;
        info!(lessons = lessons.len(), "lesson store ready");

        Ok(Self {
            roster,
            students,
            lessons,
        })
    }

    #[must_use]
    pub fn roster(&self) -> Arc<RosterService> {
        Arc::clone(&self.roster)
    }

    #[must_use]
    pub fn students(&self) -> Arc<StudentService> {
        Arc::clone(&self.students)
    }

    #[must_use]
    pub fn lessons(&self) -> &LessonStore {
        &self.lessons
    }
}
