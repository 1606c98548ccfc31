use serde::Deserialize;
use ts_rs::TS;

// 录入成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct RecordGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub term: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListParams {
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub term: Option<String>,
}

// 成绩查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub term: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGrade {
    pub school_id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub term: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub remarks: Option<String>,
}
