use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    assignments::{
        entities::{Assignment, Question, QuestionType},
        requests::{
            AssignmentListParams, AssignmentListQuery, AssignmentUpdate, CreateAssignmentRequest,
            NewAssignment, ReviewSubmissionRequest, UpdateAssignmentRequest,
        },
        responses::SubmissionListResponse,
    },
    users::entities::User,
};
use crate::services::{current_user, invalid};
use crate::storage::Storage;
use crate::utils::validate::{normalize_grade_level, normalize_section, trim_optional};

const MAX_QUESTIONS: usize = 200;

fn check_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 200 {
        return Err(CampusError::validation("Title must be 1-200 characters"));
    }
    Ok(title.to_string())
}

/// 校验题目并返回总分
pub(crate) fn validate_questions(questions: &[Question]) -> Result<f64> {
    if questions.is_empty() {
        return Err(CampusError::validation("At least one question is required"));
    }
    if questions.len() > MAX_QUESTIONS {
        return Err(CampusError::validation(format!(
            "At most {MAX_QUESTIONS} questions are allowed"
        )));
    }

    let mut ids = HashSet::new();
    let mut total = 0.0;
    for (index, question) in questions.iter().enumerate() {
        let position = index + 1;
        let id = question.id.trim();
        if id.is_empty() {
            return Err(CampusError::validation(format!(
                "Question {position}: id is required"
            )));
        }
        if !ids.insert(id) {
            return Err(CampusError::validation(format!(
                "Question {position}: duplicate id '{id}'"
            )));
        }
        if question.prompt.trim().is_empty() {
            return Err(CampusError::validation(format!(
                "Question {position}: prompt is required"
            )));
        }
        if !question.marks.is_finite() || question.marks <= 0.0 {
            return Err(CampusError::validation(format!(
                "Question {position}: marks must be positive"
            )));
        }
        if matches!(
            question.question_type,
            QuestionType::MultipleChoice | QuestionType::MultiSelect
        ) && question.options.as_ref().is_none_or(|o| o.len() < 2)
        {
            return Err(CampusError::validation(format!(
                "Question {position}: at least two options are required"
            )));
        }
        total += question.marks;
    }
    Ok(total)
}

/// 读取作业并确认是本人创建的
async fn owned_assignment(
    storage: &std::sync::Arc<dyn Storage>,
    teacher: &User,
    assignment_id: i64,
) -> Result<Assignment> {
    let assignment = storage
        .get_assignment(teacher.school_id, assignment_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Assignment not found"))?;
    if assignment.teacher_id != teacher.id {
        return Err(CampusError::authorization(
            "Only the assignment owner can do this",
        ));
    }
    Ok(assignment)
}

pub async fn list_assignments(
    service: &TeacherService,
    request: &HttpRequest,
    params: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    let (page, size) = params.pagination.normalized();

    let response = storage
        .list_assignments(
            teacher.school_id,
            AssignmentListQuery {
                page: Some(page),
                size: Some(size),
                teacher_id: Some(teacher.id),
                subject_id: params.subject_id,
                include_inactive: params.include_inactive.unwrap_or(false),
                ..Default::default()
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Assignments retrieved")))
}

pub async fn create_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    body: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let title = check_title(&body.title)?;
    let grade_level = normalize_grade_level(&body.grade_level).map_err(invalid)?;
    let section = match trim_optional(body.section) {
        Some(section) => Some(normalize_section(&section).map_err(invalid)?),
        None => None,
    };
    let total_marks = validate_questions(&body.questions)?;

    let subject = storage
        .get_subject(teacher.school_id, body.subject_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or_else(|| CampusError::not_found("Subject not found"))?;

    let assignment = storage
        .create_assignment(NewAssignment {
            school_id: teacher.school_id,
            teacher_id: teacher.id,
            subject_id: subject.id,
            title,
            description: trim_optional(body.description),
            grade_level,
            section,
            due_date: body.due_date.map(|d| d.timestamp()),
            total_marks,
            questions: body.questions,
        })
        .await?;

    tracing::info!(
        "Teacher {} created assignment {} for grade {}",
        teacher.id,
        assignment.id,
        assignment.grade_level
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "Assignment created")))
}

pub async fn get_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    let assignment = owned_assignment(&storage, &teacher, assignment_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "Assignment retrieved")))
}

pub async fn update_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: i64,
    body: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    owned_assignment(&storage, &teacher, assignment_id).await?;

    let mut update = AssignmentUpdate {
        description: body.description.map(|d| d.trim().to_string()),
        due_date: body.due_date.map(|d| d.timestamp()),
        is_active: body.is_active,
        ..Default::default()
    };
    if let Some(ref title) = body.title {
        update.title = Some(check_title(title)?);
    }
    if let Some(questions) = body.questions {
        update.total_marks = Some(validate_questions(&questions)?);
        update.questions = Some(questions);
    }

    let assignment = storage
        .update_assignment(teacher.school_id, assignment_id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Assignment not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "Assignment updated")))
}

pub async fn deactivate_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    owned_assignment(&storage, &teacher, assignment_id).await?;

    storage
        .update_assignment(
            teacher.school_id,
            assignment_id,
            AssignmentUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| CampusError::not_found("Assignment not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deactivated")))
}

pub async fn list_submissions(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    let assignment = owned_assignment(&storage, &teacher, assignment_id).await?;

    let items = storage
        .list_assignment_submissions(teacher.school_id, assignment_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse { assignment, items },
        "Submissions retrieved",
    )))
}

pub async fn review_submission(
    service: &TeacherService,
    request: &HttpRequest,
    submission_id: i64,
    body: ReviewSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let submission = storage
        .get_submission(teacher.school_id, submission_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Submission not found"))?;
    let assignment = owned_assignment(&storage, &teacher, submission.assignment_id).await?;

    if !body.score.is_finite() || body.score < 0.0 || body.score > assignment.total_marks {
        return Err(CampusError::validation(format!(
            "Score must be between 0 and {}",
            assignment.total_marks
        ))
        .into());
    }

    let reviewed = storage
        .review_submission(
            teacher.school_id,
            submission_id,
            teacher.id,
            body.score,
            trim_optional(body.feedback),
        )
        .await?
        .ok_or_else(|| CampusError::not_found("Submission not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(reviewed, "Submission reviewed")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(id: &str, question_type: QuestionType, marks: f64) -> Question {
        Question {
            id: id.into(),
            question_type,
            prompt: "What?".into(),
            options: None,
            correct_answer: Some(json!("x")),
            marks,
        }
    }

    #[test]
    fn test_total_marks_is_sum() {
        let questions = vec![
            question("q1", QuestionType::ShortAnswer, 2.0),
            question("q2", QuestionType::Essay, 5.5),
        ];
        assert_eq!(validate_questions(&questions).unwrap(), 7.5);
    }

    #[test]
    fn test_rejects_bad_questions() {
        assert!(validate_questions(&[]).is_err());
        assert!(
            validate_questions(&[
                question("q1", QuestionType::TrueFalse, 1.0),
                question("q1", QuestionType::TrueFalse, 1.0),
            ])
            .is_err()
        );
        assert!(validate_questions(&[question("q1", QuestionType::TrueFalse, 0.0)]).is_err());
        assert!(validate_questions(&[question(" ", QuestionType::TrueFalse, 1.0)]).is_err());
    }

    #[test]
    fn test_choice_questions_need_options() {
        let mut q = question("q1", QuestionType::MultipleChoice, 1.0);
        assert!(validate_questions(std::slice::from_ref(&q)).is_err());
        q.options = Some(vec!["a".into(), "b".into()]);
        assert!(validate_questions(&[q]).is_ok());
    }

    #[test]
    fn test_title_bounds() {
        assert_eq!(check_title("  Quiz 1 ").unwrap(), "Quiz 1");
        assert!(check_title("   ").is_err());
        assert!(check_title(&"x".repeat(201)).is_err());
    }
}
