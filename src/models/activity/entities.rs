use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 动态类型，声明顺序即同一时间戳下的排序顺序
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "activity.ts")]
pub enum ActivityKind {
    StudentEnrolled,
    TeacherJoined,
    AssignmentCreated,
    SubmissionReceived,
    GradeRecorded,
    AttendanceMarked,
    EventScheduled,
    AnnouncementPosted,
    AlertRaised,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 9] = [
        ActivityKind::StudentEnrolled,
        ActivityKind::TeacherJoined,
        ActivityKind::AssignmentCreated,
        ActivityKind::SubmissionReceived,
        ActivityKind::GradeRecorded,
        ActivityKind::AttendanceMarked,
        ActivityKind::EventScheduled,
        ActivityKind::AnnouncementPosted,
        ActivityKind::AlertRaised,
    ];
}

// 动态条目
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "activity.ts")]
pub struct ActivityItem {
    pub kind: ActivityKind,
    // 源记录 ID
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "activity.ts")]
pub struct ActivityParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "activity.ts")]
pub struct ActivityFeedResponse {
    pub items: Vec<ActivityItem>,
}
