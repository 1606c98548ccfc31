use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use tracing::info;

use super::AdminService;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    audit::entities::NewAuditLog,
    teachers::{
        entities::Department,
        requests::{
            CreateTeacherRequest, TeacherListParams, TeacherListQuery, TeacherProfileInput,
            TeacherProfileUpdate, UpdateTeacherRequest,
        },
        responses::TeacherResponse,
    },
    users::{
        entities::UserRole,
        requests::{NewUser, UserUpdate},
    },
};
use crate::services::{current_user, invalid, invalidate_user_cache, record_audit};
use crate::utils::password::{generate_password, hash_password_blocking};
use crate::utils::validate::{
    normalize_email, normalize_grade_level, normalize_name, normalize_section, trim_optional,
    validate_password_simple, validate_phone,
};

/// 班主任必须同时给出年级与班级，其余职能忽略班级字段
fn homeroom(
    department: &Department,
    grade: Option<String>,
    section: Option<String>,
) -> Result<(Option<String>, Option<String>)> {
    let grade = trim_optional(grade);
    let section = trim_optional(section);
    match (grade, section) {
        (Some(grade), Some(section)) => Ok((
            Some(normalize_grade_level(&grade).map_err(invalid)?),
            Some(normalize_section(&section).map_err(invalid)?),
        )),
        (None, None) if *department != Department::ClassTeacher => Ok((None, None)),
        _ => Err(CampusError::validation(
            "Class teachers need both class_grade and class_section",
        )),
    }
}

pub async fn list_teachers(
    service: &AdminService,
    request: &HttpRequest,
    params: TeacherListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (page, size) = params.pagination.normalized();

    let response = storage
        .list_teachers(
            user.school_id,
            TeacherListQuery {
                page: Some(page),
                size: Some(size),
                search: trim_optional(params.search),
                department: params.department,
                include_inactive: params.include_inactive.unwrap_or(false),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Teachers retrieved")))
}

pub async fn create_teacher(
    service: &AdminService,
    request: &HttpRequest,
    body: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let name = normalize_name(&body.name).map_err(invalid)?;
    let email = normalize_email(&body.email).map_err(invalid)?;
    let (class_grade, class_section) =
        homeroom(&body.department, body.class_grade, body.class_section)?;
    let phone = trim_optional(body.phone);
    if let Some(ref phone) = phone {
        validate_phone(phone).map_err(invalid)?;
    }

    let (password, temporary_password) = match trim_optional(body.password) {
        Some(password) => {
            validate_password_simple(&password).map_err(CampusError::validation)?;
            (password, None)
        }
        None => {
            let generated = generate_password(service.get_config().import.generated_password_length);
            (generated.clone(), Some(generated))
        }
    };
    let password_hash = hash_password_blocking(password).await?;

    let teacher = storage
        .create_teacher(
            NewUser {
                school_id: admin.school_id,
                email,
                password_hash,
                role: UserRole::Teacher,
                name,
            },
            TeacherProfileInput {
                department: body.department,
                employee_id: trim_optional(body.employee_id),
                class_grade,
                class_section,
                phone,
            },
        )
        .await?;

    info!("Teacher {} created by admin {}", teacher.user.id, admin.id);
    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "teacher.create", "teacher")
            .entity(teacher.user.id)
            .details(json!({
                "email": teacher.user.email,
                "department": teacher.profile.department.to_string(),
            })),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        TeacherResponse {
            teacher,
            temporary_password,
        },
        "Teacher created",
    )))
}

pub async fn update_teacher(
    service: &AdminService,
    request: &HttpRequest,
    teacher_id: i64,
    body: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let current = storage
        .get_teacher(admin.school_id, teacher_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Teacher not found"))?;

    let mut user_update = UserUpdate {
        is_active: body.is_active,
        ..Default::default()
    };
    if let Some(ref name) = body.name {
        user_update.name = Some(normalize_name(name).map_err(invalid)?);
    }
    if let Some(ref email) = body.email {
        user_update.email = Some(normalize_email(email).map_err(invalid)?);
    }
    if let Some(password) = body.password {
        validate_password_simple(&password).map_err(CampusError::validation)?;
        user_update.password_hash = Some(hash_password_blocking(password).await?);
    }

    // 职能或班级变化时重新校验班主任的班级
    let department = body
        .department
        .clone()
        .unwrap_or_else(|| current.profile.department.clone());
    let mut profile_update = TeacherProfileUpdate {
        department: body.department,
        employee_id: body.employee_id.map(|v| v.trim().to_string()),
        ..Default::default()
    };
    if profile_update.department.is_some()
        || body.class_grade.is_some()
        || body.class_section.is_some()
    {
        let (grade, section) = homeroom(
            &department,
            body.class_grade.or(current.profile.class_grade),
            body.class_section.or(current.profile.class_section),
        )?;
        profile_update.class_grade = grade;
        profile_update.class_section = section;
    }
    if let Some(phone) = body.phone {
        validate_phone(&phone).map_err(invalid)?;
        profile_update.phone = Some(phone.trim().to_string());
    }

    let teacher = storage
        .update_teacher(admin.school_id, teacher_id, user_update, profile_update)
        .await?
        .ok_or_else(|| CampusError::not_found("Teacher not found"))?;

    invalidate_user_cache(request, teacher_id).await;
    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "teacher.update", "teacher")
            .entity(teacher_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teacher updated")))
}

pub async fn deactivate_teacher(
    service: &AdminService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    storage
        .update_teacher(
            admin.school_id,
            teacher_id,
            UserUpdate {
                is_active: Some(false),
                ..Default::default()
            },
            TeacherProfileUpdate::default(),
        )
        .await?
        .ok_or_else(|| CampusError::not_found("Teacher not found"))?;

    invalidate_user_cache(request, teacher_id).await;
    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "teacher.deactivate", "teacher")
            .entity(teacher_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deactivated")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_teacher_needs_homeroom() {
        assert!(homeroom(&Department::ClassTeacher, None, None).is_err());
        assert!(homeroom(&Department::ClassTeacher, Some("10".into()), None).is_err());
        let (grade, section) =
            homeroom(&Department::ClassTeacher, Some("10".into()), Some("b".into())).unwrap();
        assert_eq!(grade.as_deref(), Some("10"));
        assert_eq!(section.as_deref(), Some("B"));
    }

    #[test]
    fn test_other_departments_may_skip_homeroom() {
        assert_eq!(
            homeroom(&Department::Director, None, Some("  ".into())).unwrap(),
            (None, None)
        );
    }
}
