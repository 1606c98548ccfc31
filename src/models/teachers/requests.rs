use serde::Deserialize;
use ts_rs::TS;

use super::entities::Department;
use crate::models::common::PaginationQuery;

// 创建教师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct CreateTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub department: Department,
    pub employee_id: Option<String>,
    pub class_grade: Option<String>,
    pub class_section: Option<String>,
    pub phone: Option<String>,
}

// 更新教师请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub department: Option<Department>,
    pub employee_id: Option<String>,
    pub class_grade: Option<String>,
    pub class_section: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

// 教师列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department: Option<Department>,
    #[serde(default, deserialize_with = "crate::models::common::lenient::opt_bool")]
    pub include_inactive: Option<bool>,
}

// 教师列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct TeacherListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub search: Option<String>,
    pub department: Option<Department>,
    pub include_inactive: bool,
}

// 教师档案（存储层输入）
#[derive(Debug, Clone)]
pub struct TeacherProfileInput {
    pub department: Department,
    pub employee_id: Option<String>,
    pub class_grade: Option<String>,
    pub class_section: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeacherProfileUpdate {
    pub department: Option<Department>,
    pub employee_id: Option<String>,
    pub class_grade: Option<String>,
    pub class_section: Option<String>,
    pub phone: Option<String>,
}
