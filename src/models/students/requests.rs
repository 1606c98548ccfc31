use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 创建学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    /// 不提供时自动生成临时密码
    pub password: Option<String>,
    pub grade_level: String,
    pub section: String,
    pub admission_number: Option<String>,
    pub roll_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
}

// 更新学生请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub grade_level: Option<String>,
    pub section: Option<String>,
    pub admission_number: Option<String>,
    pub roll_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub is_active: Option<bool>,
}

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub grade_level: Option<String>,
    pub section: Option<String>,
    #[serde(default, deserialize_with = "crate::models::common::lenient::opt_bool")]
    pub include_inactive: Option<bool>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub search: Option<String>,
    pub grade_level: Option<String>,
    pub section: Option<String>,
    pub include_inactive: bool,
}

impl StudentListQuery {
    /// 某个班级的全部在读学生（不分页）
    pub fn class(grade_level: &str, section: Option<&str>) -> Self {
        Self {
            grade_level: Some(grade_level.to_string()),
            section: section.map(str::to_string),
            ..Default::default()
        }
    }
}

// 学生档案（存储层输入）
#[derive(Debug, Clone, Default)]
pub struct StudentProfileInput {
    pub grade_level: String,
    pub section: String,
    pub admission_number: Option<String>,
    pub roll_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
}

// 学生档案更新（存储层输入）
#[derive(Debug, Clone, Default)]
pub struct StudentProfileUpdate {
    pub grade_level: Option<String>,
    pub section: Option<String>,
    pub admission_number: Option<String>,
    pub roll_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
}

/// 批量导入请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ImportStudentsRequest {
    pub students: Vec<ImportStudentRow>,
    #[serde(default)]
    pub options: ImportOptions,
}

/// 导入选项
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ImportOptions {
    /// 同校已存在相同邮箱的学生时更新其资料，否则记为重复
    #[serde(default)]
    pub update_existing: bool,
    /// 行内未提供密码时使用的默认密码
    pub default_password: Option<String>,
}

/// 导入行
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ImportStudentRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub section: String,
    pub admission_number: Option<String>,
    pub roll_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub password: Option<String>,
}

impl From<CreateStudentRequest> for ImportStudentRow {
    fn from(req: CreateStudentRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            grade_level: req.grade_level,
            section: req.section,
            admission_number: req.admission_number,
            roll_number: req.roll_number,
            date_of_birth: req.date_of_birth,
            guardian_name: req.guardian_name,
            guardian_phone: req.guardian_phone,
            guardian_email: req.guardian_email,
            password: req.password,
        }
    }
}
