use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::AdminService;
use crate::errors::CampusError;
use crate::models::{
    ApiResponse,
    audit::entities::NewAuditLog,
    subjects::requests::{
        AssignTeacherRequest, CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
    },
};
use crate::services::{current_user, invalid, record_audit};
use crate::utils::validate::{
    normalize_grade_level, normalize_name, normalize_section, normalize_subject_code,
    trim_optional,
};

pub async fn list_subjects(
    service: &AdminService,
    request: &HttpRequest,
    params: SubjectListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let grade_level = trim_optional(params.grade_level);
    let subjects = storage
        .list_subjects(
            user.school_id,
            grade_level.as_deref(),
            params.include_inactive.unwrap_or(false),
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(subjects, "Subjects retrieved")))
}

pub async fn create_subject(
    service: &AdminService,
    request: &HttpRequest,
    body: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let normalized = CreateSubjectRequest {
        name: normalize_name(&body.name).map_err(invalid)?,
        code: normalize_subject_code(&body.code).map_err(invalid)?,
        grade_level: match trim_optional(body.grade_level) {
            Some(grade) => Some(normalize_grade_level(&grade).map_err(invalid)?),
            None => None,
        },
    };

    if storage
        .get_subject_by_code(admin.school_id, &normalized.code)
        .await?
        .is_some()
    {
        return Err(CampusError::conflict(format!(
            "Subject code '{}' already exists",
            normalized.code
        ))
        .into());
    }

    let subject = storage.create_subject(admin.school_id, normalized).await?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "subject.create", "subject")
            .entity(subject.id)
            .details(json!({ "code": subject.code })),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(subject, "Subject created")))
}

pub async fn update_subject(
    service: &AdminService,
    request: &HttpRequest,
    subject_id: i64,
    body: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    if body.is_empty() {
        return Err(CampusError::validation("No fields to update").into());
    }

    let update = UpdateSubjectRequest {
        name: match body.name {
            Some(ref name) => Some(normalize_name(name).map_err(invalid)?),
            None => None,
        },
        code: match body.code {
            Some(ref code) => Some(normalize_subject_code(code).map_err(invalid)?),
            None => None,
        },
        grade_level: match body.grade_level {
            Some(ref grade) => Some(normalize_grade_level(grade).map_err(invalid)?),
            None => None,
        },
        is_active: body.is_active,
    };

    let subject = storage
        .update_subject(admin.school_id, subject_id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Subject not found"))?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "subject.update", "subject")
            .entity(subject_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated")))
}

pub async fn deactivate_subject(
    service: &AdminService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    storage
        .update_subject(
            admin.school_id,
            subject_id,
            UpdateSubjectRequest {
                name: None,
                code: None,
                grade_level: None,
                is_active: Some(false),
            },
        )
        .await?
        .ok_or_else(|| CampusError::not_found("Subject not found"))?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "subject.deactivate", "subject")
            .entity(subject_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deactivated")))
}

/// 为科目分配任课教师（教师必须属于本校且在职）
pub async fn assign_teacher(
    service: &AdminService,
    request: &HttpRequest,
    subject_id: i64,
    body: AssignTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let subject = storage
        .get_subject(admin.school_id, subject_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Subject not found"))?;

    let teacher = storage
        .get_teacher(admin.school_id, body.teacher_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Teacher not found"))?;
    if !teacher.user.is_active {
        return Err(CampusError::validation("Teacher is inactive").into());
    }

    let assignment = AssignTeacherRequest {
        teacher_id: body.teacher_id,
        grade_level: normalize_grade_level(&body.grade_level).map_err(invalid)?,
        section: match trim_optional(body.section) {
            Some(section) => Some(normalize_section(&section).map_err(invalid)?),
            None => None,
        },
    };

    let record = storage
        .assign_teacher_subject(admin.school_id, subject.id, assignment)
        .await?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "subject.assign_teacher", "subject")
            .entity(subject.id)
            .details(json!({ "teacher_id": body.teacher_id })),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(record, "Teacher assigned")))
}
