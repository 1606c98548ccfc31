pub mod activity;
pub mod alerts;
pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod audit;
pub mod auth;
pub mod calendar;
pub mod common;
pub mod grades;
pub mod reports;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod timetable;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery};
