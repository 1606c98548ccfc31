use std::collections::HashMap;

use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Question, SubmissionStatus};
use crate::models::common::PaginationQuery;

// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub subject_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub grade_level: String,
    pub section: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub questions: Vec<Question>,
}

// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub questions: Option<Vec<Question>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "crate::models::common::lenient::opt_i64")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::common::lenient::opt_bool")]
    pub include_inactive: Option<bool>,
}

// 作业列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub teacher_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub grade_level: Option<String>,
    /// 学生班级：匹配 section 相同或面向整个年级的作业
    pub section: Option<String>,
    pub include_inactive: bool,
}

// 学生提交
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmitAssignmentRequest {
    #[ts(type = "Record<string, unknown>")]
    pub answers: HashMap<String, serde_json::Value>,
}

// 教师批改
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct ReviewSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

// 新作业（存储层输入）
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub school_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub grade_level: String,
    pub section: Option<String>,
    pub due_date: Option<i64>,
    pub total_marks: f64,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<i64>,
    pub total_marks: Option<f64>,
    pub questions: Option<Vec<Question>>,
    pub is_active: Option<bool>,
}

// 新提交（存储层输入），同一学生重复提交时覆盖
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub school_id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub answers: HashMap<String, serde_json::Value>,
    pub auto_score: f64,
    pub status: SubmissionStatus,
    pub is_late: bool,
}
