use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    grades::requests::{GradeListParams, GradeListQuery, NewGrade, RecordGradeRequest},
};
use crate::services::current_user;
use crate::utils::validate::trim_optional;

/// 校验分数区间
pub(crate) fn check_marks(obtained: f64, max: f64) -> Result<()> {
    if !max.is_finite() || max <= 0.0 {
        return Err(CampusError::validation("max_marks must be positive"));
    }
    if !obtained.is_finite() || obtained < 0.0 || obtained > max {
        return Err(CampusError::validation(
            "marks_obtained must be between 0 and max_marks",
        ));
    }
    Ok(())
}

fn required_label(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 50 {
        return Err(CampusError::validation(format!(
            "{field} must be 1-50 characters"
        )));
    }
    Ok(value.to_string())
}

pub async fn record_grade(
    service: &TeacherService,
    request: &HttpRequest,
    body: RecordGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    check_marks(body.marks_obtained, body.max_marks)?;
    let term = required_label(&body.term, "term")?;
    let exam_type = required_label(&body.exam_type, "exam_type")?;

    storage
        .get_student_profile(teacher.school_id, body.student_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;
    storage
        .get_subject(teacher.school_id, body.subject_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Subject not found"))?;

    let grade = storage
        .create_grade(NewGrade {
            school_id: teacher.school_id,
            student_id: body.student_id,
            subject_id: body.subject_id,
            teacher_id: teacher.id,
            term,
            exam_type,
            marks_obtained: body.marks_obtained,
            max_marks: body.max_marks,
            remarks: trim_optional(body.remarks),
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade recorded")))
}

pub async fn list_grades(
    service: &TeacherService,
    request: &HttpRequest,
    params: GradeListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let grades = storage
        .list_grades(
            teacher.school_id,
            GradeListQuery {
                student_id: params.student_id,
                subject_id: params.subject_id,
                teacher_id: Some(teacher.id),
                term: trim_optional(params.term),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(grades, "Grades retrieved")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_bounds() {
        assert!(check_marks(45.0, 50.0).is_ok());
        assert!(check_marks(0.0, 50.0).is_ok());
        assert!(check_marks(51.0, 50.0).is_err());
        assert!(check_marks(-1.0, 50.0).is_err());
        assert!(check_marks(1.0, 0.0).is_err());
        assert!(check_marks(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(required_label(" Term 1 ", "term").unwrap(), "Term 1");
        assert!(required_label("", "term").is_err());
    }
}
