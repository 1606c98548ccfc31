use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub grade_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub grade_level: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateSubjectRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.code.is_none()
            && self.grade_level.is_none()
            && self.is_active.is_none()
    }
}

// 分配任课教师
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct AssignTeacherRequest {
    pub teacher_id: i64,
    pub grade_level: String,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectListParams {
    pub grade_level: Option<String>,
    pub include_inactive: Option<bool>,
}
