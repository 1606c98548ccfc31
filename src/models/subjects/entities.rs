use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct Subject {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub code: String,
    pub grade_level: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 教师任课关联
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct TeacherSubject {
    pub id: i64,
    pub school_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub grade_level: String,
    // 为空表示该年级所有班
    pub section: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 任课安排视图（带科目信息和学生人数）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct TeachingAssignment {
    pub id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub subject_code: String,
    pub grade_level: String,
    pub section: Option<String>,
    pub student_count: u64,
}
