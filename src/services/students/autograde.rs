//! 客观题自动批改
//!
//! 标量统一成去空白的小写字符串，数字（含数字字符串）经 `f64` 归一，
//! 因此 `"5"`、`5`、`"5.0"` 视为相同。数组答案与顺序无关，
//! 学生也可以用逗号分隔的字符串作答。

use std::collections::HashMap;

use serde_json::Value;

use crate::models::assignments::{
    entities::{Question, SubmissionStatus},
    responses::QuestionResult,
};

/// 批改结果
#[derive(Debug, Clone, PartialEq)]
pub struct GradingOutcome {
    pub auto_score: f64,
    pub status: SubmissionStatus,
    pub results: Vec<QuestionResult>,
}

fn normalize_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(normalize_number(n)),
        _ => Some(text.to_lowercase()),
    }
}

fn normalize_number(n: f64) -> String {
    // -0 与 0 相同
    if n == 0.0 { "0".to_string() } else { n.to_string() }
}

/// 归一化单个值，数组和对象返回 None
fn normalize_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => normalize_text(s),
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(normalize_number),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// 把作答展开成已排序的归一化元素
fn normalize_list(value: &Value) -> Option<Vec<String>> {
    let mut items = match value {
        Value::Array(values) => values.iter().map(normalize_scalar).collect::<Option<Vec<_>>>()?,
        Value::String(s) => s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(normalize_text)
            .collect::<Option<Vec<_>>>()?,
        other => vec![normalize_scalar(other)?],
    };
    items.sort();
    Some(items)
}

/// 作答是否与标准答案一致
pub fn answers_match(correct: &Value, submitted: &Value) -> bool {
    match correct {
        Value::Array(_) => match (normalize_list(correct), normalize_list(submitted)) {
            (Some(expected), Some(actual)) => !expected.is_empty() && expected == actual,
            _ => false,
        },
        _ => {
            let Some(expected) = normalize_scalar(correct) else {
                return false;
            };
            let actual = match submitted {
                Value::Array(values) if values.len() == 1 => normalize_scalar(&values[0]),
                other => normalize_scalar(other),
            };
            actual.is_some_and(|a| a == expected)
        }
    }
}

/// 批改一份提交
///
/// 含需人工批改的题目时状态为 `pending_review`，否则为 `graded`。
pub fn grade_submission(questions: &[Question], answers: &HashMap<String, Value>) -> GradingOutcome {
    let mut auto_score = 0.0;
    let mut needs_review = false;
    let mut results = Vec::with_capacity(questions.len());

    for question in questions {
        if question.needs_manual_review() {
            needs_review = true;
            results.push(QuestionResult {
                question_id: question.id.clone(),
                correct: None,
                awarded: 0.0,
                marks: question.marks,
            });
            continue;
        }

        let correct = match (&question.correct_answer, answers.get(&question.id)) {
            (Some(expected), Some(given)) => answers_match(expected, given),
            _ => false,
        };
        let awarded = if correct { question.marks } else { 0.0 };
        auto_score += awarded;
        results.push(QuestionResult {
            question_id: question.id.clone(),
            correct: Some(correct),
            awarded,
            marks: question.marks,
        });
    }

    GradingOutcome {
        auto_score: (auto_score * 100.0).round() / 100.0,
        status: if needs_review {
            SubmissionStatus::PendingReview
        } else {
            SubmissionStatus::Graded
        },
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::QuestionType;
    use serde_json::json;

    fn question(id: &str, question_type: QuestionType, correct: Option<Value>, marks: f64) -> Question {
        Question {
            id: id.into(),
            question_type,
            prompt: "?".into(),
            options: None,
            correct_answer: correct,
            marks,
        }
    }

    #[test]
    fn test_scalar_normalization() {
        assert!(answers_match(&json!("Paris"), &json!("  paris ")));
        assert!(answers_match(&json!(5), &json!("5")));
        assert!(answers_match(&json!("5"), &json!("5.0")));
        assert!(answers_match(&json!(2.5), &json!("2.50")));
        assert!(answers_match(&json!(true), &json!("TRUE")));
        assert!(answers_match(&json!("false"), &json!(false)));
        assert!(!answers_match(&json!("5"), &json!("6")));
        assert!(!answers_match(&json!("a"), &json!(null)));
        assert!(!answers_match(&json!("a"), &json!("")));
    }

    #[test]
    fn test_array_answers_ignore_order() {
        let correct = json!(["A", "c"]);
        assert!(answers_match(&correct, &json!(["c", "a"])));
        assert!(answers_match(&correct, &json!("C, A")));
        assert!(!answers_match(&correct, &json!(["a"])));
        assert!(!answers_match(&correct, &json!(["a", "b", "c"])));
        assert!(!answers_match(&json!([]), &json!([])));
    }

    #[test]
    fn test_scalar_against_single_element_array() {
        assert!(answers_match(&json!("B"), &json!(["b"])));
        assert!(!answers_match(&json!("B"), &json!(["b", "c"])));
    }

    #[test]
    fn test_grading_all_objective() {
        let questions = vec![
            question("q1", QuestionType::MultipleChoice, Some(json!("B")), 2.0),
            question("q2", QuestionType::TrueFalse, Some(json!(true)), 1.0),
            question("q3", QuestionType::FillBlank, Some(json!(42)), 3.0),
        ];
        let answers = HashMap::from([
            ("q1".to_string(), json!("b")),
            ("q2".to_string(), json!("false")),
        ]);
        let outcome = grade_submission(&questions, &answers);

        assert_eq!(outcome.auto_score, 2.0);
        assert_eq!(outcome.status, SubmissionStatus::Graded);
        assert_eq!(outcome.results[0].correct, Some(true));
        assert_eq!(outcome.results[1].correct, Some(false));
        // 未作答记 0 分
        assert_eq!(outcome.results[2].awarded, 0.0);
    }

    #[test]
    fn test_essay_needs_review() {
        let questions = vec![
            question("q1", QuestionType::ShortAnswer, Some(json!("Mitochondria")), 1.0),
            question("q2", QuestionType::Essay, None, 5.0),
        ];
        let answers = HashMap::from([
            ("q1".to_string(), json!("mitochondria")),
            ("q2".to_string(), json!("A long answer")),
        ]);
        let outcome = grade_submission(&questions, &answers);

        assert_eq!(outcome.auto_score, 1.0);
        assert_eq!(outcome.status, SubmissionStatus::PendingReview);
        assert_eq!(outcome.results[1].correct, None);
    }
}
