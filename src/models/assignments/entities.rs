use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    FillBlank,
    MultiSelect,
    Essay,
}

impl QuestionType {
    /// 客观题可以自动批改
    pub fn is_objective(&self) -> bool {
        !matches!(self, QuestionType::Essay)
    }
}

// 题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// 学生视图中会被移除
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub correct_answer: Option<serde_json::Value>,
    pub marks: f64,
}

impl Question {
    /// 是否需要人工批改
    pub fn needs_manual_review(&self) -> bool {
        !self.question_type.is_objective()
            || self
                .correct_answer
                .as_ref()
                .is_none_or(serde_json::Value::is_null)
    }
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub school_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub grade_level: String,
    // 为空表示面向整个年级
    pub section: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_marks: f64,
    pub questions: Vec<Question>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 作业是否面向该班级
    pub fn targets(&self, grade_level: &str, section: &str) -> bool {
        self.grade_level == grade_level
            && self
                .section
                .as_deref()
                .is_none_or(|s| s.eq_ignore_ascii_case(section))
    }

    /// 去掉标准答案（学生视图）
    pub fn without_answers(mut self) -> Self {
        for question in &mut self.questions {
            question.correct_answer = None;
        }
        self
    }

    pub fn is_overdue_at(&self, at: chrono::DateTime<chrono::Utc>) -> bool {
        self.due_date.is_some_and(|due| at > due)
    }
}

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum SubmissionStatus {
    PendingReview,
    Graded,
}

impl SubmissionStatus {
    pub const PENDING_REVIEW: &'static str = "pending_review";
    pub const GRADED: &'static str = "graded";
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::PendingReview => write!(f, "{}", Self::PENDING_REVIEW),
            SubmissionStatus::Graded => write!(f, "{}", Self::GRADED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING_REVIEW => Ok(SubmissionStatus::PendingReview),
            Self::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub school_id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    #[ts(type = "Record<string, unknown>")]
    pub answers: HashMap<String, serde_json::Value>,
    pub auto_score: f64,
    pub score: Option<f64>,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    // 人工批改的教师
    pub reviewed_by: Option<i64>,
}

impl Submission {
    /// 教师人工批改后不允许再次提交
    pub fn is_locked(&self) -> bool {
        self.reviewed_by.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(question_type: QuestionType, correct: Option<serde_json::Value>) -> Question {
        Question {
            id: "q1".into(),
            question_type,
            prompt: "?".into(),
            options: None,
            correct_answer: correct,
            marks: 1.0,
        }
    }

    #[test]
    fn test_manual_review_detection() {
        assert!(question(QuestionType::Essay, Some(json!("x"))).needs_manual_review());
        assert!(question(QuestionType::ShortAnswer, None).needs_manual_review());
        assert!(question(QuestionType::ShortAnswer, Some(serde_json::Value::Null)).needs_manual_review());
        assert!(!question(QuestionType::TrueFalse, Some(json!(true))).needs_manual_review());
    }

    #[test]
    fn test_question_type_field_name() {
        let q: Question = serde_json::from_value(json!({
            "id": "a",
            "type": "multi_select",
            "prompt": "pick",
            "options": ["x", "y"],
            "correct_answer": ["x"],
            "marks": 2
        }))
        .unwrap();
        assert_eq!(q.question_type, QuestionType::MultiSelect);
        assert_eq!(q.marks, 2.0);
    }
}
