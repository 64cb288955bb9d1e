#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod roster_service;
pub mod schedule;
pub mod student_service;

pub use swim_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, RosterServiceError, ScheduleServiceError, StudentServiceError};
pub use roster_service::RosterService;
pub use schedule::{LessonStore, ScheduleService};
pub use student_service::StudentService;
