use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeRecord {
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub term: String,
    // 例如 midterm / final / quiz
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl GradeRecord {
    pub fn percentage(&self) -> f64 {
        percentage(self.marks_obtained, self.max_marks)
    }
}

pub fn percentage(obtained: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (obtained / max * 10000.0).round() / 100.0
}

/// 平均百分比，无成绩时为 None
pub fn average_percentage<'a, I>(grades: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let (sum, count) = grades
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), g| (sum + g.percentage(), count + 1));
    if count == 0 {
        None
    } else {
        Some((sum / f64::from(count) * 100.0).round() / 100.0)
    }
}

// 成绩（附带学生和科目名称）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: GradeRecord,
    pub student_name: String,
    pub subject_name: String,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(45.0, 50.0), 90.0);
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(5.0, 0.0), 0.0);
    }
}
