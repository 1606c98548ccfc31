use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use crate::models::common::PaginationInfo;

// 学生响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentResponse {
    pub student: Student,
    /// 仅在系统生成密码时返回一次
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
}

// 学生列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

/// 导入成功（新建或更新）的行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ImportedRow {
    pub row: usize,
    pub email: String,
    pub student_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
}

/// 导入失败、重复或警告的行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ImportIssue {
    pub row: usize,
    pub email: String,
    pub message: String,
}

/// 导入结果
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentImportResponse {
    pub total: usize,
    pub success: Vec<ImportedRow>,
    pub updated: Vec<ImportedRow>,
    pub duplicates: Vec<ImportIssue>,
    pub failed: Vec<ImportIssue>,
    pub warnings: Vec<ImportIssue>,
}
