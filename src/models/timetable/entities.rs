use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课表节次
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "timetable.ts")]
pub struct TimetableSlot {
    pub id: i64,
    pub school_id: i64,
    pub grade_level: String,
    pub section: String,
    // 1 = 周一 ... 7 = 周日
    pub day_of_week: i32,
    pub period: i32,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    // HH:MM
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}

// 课表节次（带科目/教师名称）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "timetable.ts")]
pub struct TimetableEntry {
    #[serde(flatten)]
    #[ts(flatten)]
    pub slot: TimetableSlot,
    pub subject_name: String,
    pub teacher_name: Option<String>,
}
