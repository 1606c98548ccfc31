//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod announcements;
pub mod assignment_submissions;
pub mod assignments;
pub mod attendance;
pub mod audit_logs;
pub mod calendar_events;
pub mod grades;
pub mod schools;
pub mod student_alerts;
pub mod student_profiles;
pub mod subjects;
pub mod teacher_profiles;
pub mod teacher_subjects;
pub mod timetables;
pub mod users;

use chrono::{DateTime, Utc};

/// 数据库中的 Unix 时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
