use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "timetable.ts")]
pub struct TimetableParams {
    pub grade_level: String,
    pub section: String,
}

/// 整体替换某个班级的课表
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "timetable.ts")]
pub struct UpsertTimetableRequest {
    pub grade_level: String,
    pub section: String,
    pub slots: Vec<TimetableSlotInput>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "timetable.ts")]
pub struct TimetableSlotInput {
    pub day_of_week: i32,
    pub period: i32,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}
