use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::User;

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentProfile {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub admission_number: Option<String>,
    // 年级，例如 "10"
    pub grade_level: String,
    // 班级/分班，例如 "A"
    pub section: String,
    pub roll_number: Option<String>,
    // YYYY-MM-DD
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl StudentProfile {
    /// 是否属于指定班级
    pub fn in_class(&self, grade_level: &str, section: &str) -> bool {
        self.grade_level == grade_level && self.section.eq_ignore_ascii_case(section)
    }
}

// 学生（账号 + 档案）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub user: User,
    pub profile: StudentProfile,
}

impl Student {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}
