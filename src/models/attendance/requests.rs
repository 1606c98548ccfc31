use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;

// 批量考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct MarkAttendanceRequest {
    pub date: String,
    pub records: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

// 考勤表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSheetParams {
    pub date: Option<String>,
    pub grade_level: Option<String>,
    pub section: Option<String>,
}

// 学生本人考勤查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceRangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

// 考勤写入（存储层输入）
#[derive(Debug, Clone)]
pub struct AttendanceUpsert {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

// 考勤查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AttendanceQuery {
    pub student_ids: Option<Vec<i64>>,
    // 闭区间，YYYY-MM-DD
    pub from: Option<String>,
    pub to: Option<String>,
}
