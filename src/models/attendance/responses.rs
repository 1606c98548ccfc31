use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceRecord, AttendanceStatus, AttendanceSummary};

/// 考勤表中的一行
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSheetRow {
    pub student_id: i64,
    pub student_name: String,
    pub grade_level: String,
    pub section: String,
    pub roll_number: Option<String>,
    /// 未登记时为 None
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSheetResponse {
    pub date: String,
    pub rows: Vec<AttendanceSheetRow>,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct MarkAttendanceResponse {
    pub date: String,
    pub marked: usize,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendanceResponse {
    pub records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}
