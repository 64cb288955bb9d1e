#![forbid(unsafe_code)]

pub mod model;
pub mod query;
pub mod schedule;
pub mod time;
pub mod timetable;

pub use time::Clock;
