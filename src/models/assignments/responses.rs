use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assignment, Submission, SubmissionStatus};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

/// 学生看到的作业（附带本人提交状态）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct StudentAssignment {
    pub assignment: Assignment,
    pub submission_status: Option<SubmissionStatus>,
    pub score: Option<f64>,
    pub is_late: Option<bool>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct StudentAssignmentListResponse {
    pub items: Vec<StudentAssignment>,
    pub pagination: PaginationInfo,
}

/// 单题批改结果
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct QuestionResult {
    pub question_id: String,
    /// 需人工批改的题目为 None
    pub correct: Option<bool>,
    pub awarded: f64,
    pub marks: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmitAssignmentResponse {
    pub submission: Submission,
    pub results: Vec<QuestionResult>,
}

/// 教师查看的提交（带学生信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmissionWithStudent {
    pub submission: Submission,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmissionListResponse {
    pub assignment: Assignment,
    pub items: Vec<SubmissionWithStudent>,
}
