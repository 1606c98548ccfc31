use serde::Serialize;
use ts_rs::TS;

use crate::models::alerts::entities::AlertSeverity;
use crate::models::announcements::entities::Announcement;
use crate::models::assignments::entities::Assignment;
use crate::models::calendar::entities::CalendarEvent;

// 管理员看板
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct AdminDashboard {
    pub students: u64,
    pub teachers: u64,
    pub subjects: u64,
    pub active_assignments: u64,
    pub today_attendance_rate: Option<f64>,
    pub open_alerts: u64,
}

// 班主任名册行
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct RosterEntry {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub roll_number: Option<String>,
    pub attendance_rate: Option<f64>,
    pub average_grade: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct ClassRoster {
    pub grade_level: String,
    pub section: String,
    pub students: Vec<RosterEntry>,
}

// 班级汇总（协调员视图）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct ClassOverview {
    pub grade_level: String,
    pub section: String,
    pub students: u64,
    // 近 30 天出勤率
    pub attendance_rate: Option<f64>,
    pub assignments: u64,
    pub submission_rate: Option<f64>,
    pub average_grade: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct CoordinatorOverview {
    pub classes: Vec<ClassOverview>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct SubjectPerformance {
    pub subject_id: i64,
    pub subject_name: String,
    pub grades_recorded: u64,
    pub average_grade: Option<f64>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct AlertCount {
    pub severity: AlertSeverity,
    pub open: u64,
}

// 教学主任看板
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct DirectorOverview {
    pub students: u64,
    pub teachers: u64,
    pub active_assignments: u64,
    // 近 30 天出勤率
    pub attendance_rate: Option<f64>,
    pub average_grade: Option<f64>,
    pub subject_performance: Vec<SubjectPerformance>,
    pub open_alerts: Vec<AlertCount>,
}

// 学生看板
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "report.ts")]
pub struct StudentDashboard {
    pub pending_assignments: Vec<Assignment>,
    pub attendance_rate: Option<f64>,
    pub average_grade: Option<f64>,
    pub upcoming_events: Vec<CalendarEvent>,
    pub recent_announcements: Vec<Announcement>,
}
