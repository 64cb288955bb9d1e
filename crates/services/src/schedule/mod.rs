mod service;
mod store;

// Public API of the schedule subsystem.
pub use crate::error::ScheduleServiceError;
pub use service::ScheduleService;
pub use store::LessonStore;
