use crate::models::students::entities::StudentProfile;
use crate::models::teachers::entities::TeacherProfile;
use crate::models::users::entities::{School, User};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginResponse {
    pub user: User,
    pub school: School,
    /// 令牌有效期（秒）
    pub expires_in: i64,
}

/// 当前用户及其档案
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct CurrentUserResponse {
    pub user: User,
    pub teacher_profile: Option<TeacherProfile>,
    pub student_profile: Option<StudentProfile>,
}
