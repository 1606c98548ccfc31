use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use tracing::info;

use super::AdminService;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    audit::entities::NewAuditLog,
    students::{
        requests::{
            CreateStudentRequest, ImportStudentRow, StudentListParams, StudentListQuery,
            StudentProfileInput, StudentProfileUpdate, UpdateStudentRequest,
        },
        responses::StudentResponse,
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
    validate_date, validate_password_simple, validate_phone,
};

/// 校验后的学生数据
#[derive(Debug, Clone)]
pub(crate) struct ValidatedStudent {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub profile: StudentProfileInput,
}

/// 校验单行学生数据（单个创建与批量导入共用）
pub(crate) fn validate_student_row(row: &ImportStudentRow) -> std::result::Result<ValidatedStudent, String> {
    let name = normalize_name(&row.name).map_err(str::to_string)?;
    let email = normalize_email(&row.email).map_err(str::to_string)?;
    let grade_level = normalize_grade_level(&row.grade_level).map_err(str::to_string)?;
    let section = normalize_section(&row.section).map_err(str::to_string)?;

    let date_of_birth = trim_optional(row.date_of_birth.clone());
    if let Some(ref dob) = date_of_birth {
        validate_date(dob).map_err(|e| format!("Date of birth: {e}"))?;
    }

    let guardian_phone = trim_optional(row.guardian_phone.clone());
    if let Some(ref phone) = guardian_phone {
        validate_phone(phone).map_err(|e| format!("Guardian phone: {e}"))?;
    }

    let guardian_email = match trim_optional(row.guardian_email.clone()) {
        Some(email) => Some(normalize_email(&email).map_err(|e| format!("Guardian email: {e}"))?),
        None => None,
    };

    let password = trim_optional(row.password.clone());
    if let Some(ref password) = password {
        validate_password_simple(password)?;
    }

    Ok(ValidatedStudent {
        name,
        email,
        password,
        profile: StudentProfileInput {
            grade_level,
            section,
            admission_number: trim_optional(row.admission_number.clone()),
            roll_number: trim_optional(row.roll_number.clone()),
            date_of_birth,
            guardian_name: trim_optional(row.guardian_name.clone()),
            guardian_phone,
            guardian_email,
        },
    })
}

pub async fn list_students(
    service: &AdminService,
    request: &HttpRequest,
    params: StudentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (page, size) = params.pagination.normalized();

    let section = match trim_optional(params.section) {
        Some(section) => Some(normalize_section(&section).map_err(invalid)?),
        None => None,
    };

    let query = StudentListQuery {
        page: Some(page),
        size: Some(size),
        search: trim_optional(params.search),
        grade_level: trim_optional(params.grade_level),
        section,
        include_inactive: params.include_inactive.unwrap_or(false),
    };

    let response = storage.list_students(user.school_id, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Students retrieved")))
}

pub async fn get_student(
    service: &AdminService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let student = storage
        .get_student(user.school_id, student_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student retrieved")))
}

pub async fn create_student(
    service: &AdminService,
    request: &HttpRequest,
    body: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let row = ImportStudentRow::from(body);
    let validated = validate_student_row(&row).map_err(CampusError::validation)?;

    let (password, temporary_password) = match validated.password {
        Some(password) => (password, None),
        None => {
            let generated = generate_password(service.get_config().import.generated_password_length);
            (generated.clone(), Some(generated))
        }
    };
    let password_hash = hash_password_blocking(password).await?;

    let student = storage
        .create_student(
            NewUser {
                school_id: admin.school_id,
                email: validated.email,
                password_hash,
                role: UserRole::Student,
                name: validated.name,
            },
            validated.profile,
        )
        .await?;

    info!("Student {} created by admin {}", student.id(), admin.id);
    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "student.create", "student")
            .entity(student.id())
            .details(json!({ "email": student.user.email })),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        StudentResponse {
            student,
            temporary_password,
        },
        "Student created",
    )))
}

/// 把更新请求拆成用户与档案两部分
pub(crate) async fn build_student_update(
    body: UpdateStudentRequest,
) -> Result<(UserUpdate, StudentProfileUpdate)> {
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

    let mut profile = StudentProfileUpdate {
        admission_number: body.admission_number.map(|v| v.trim().to_string()),
        roll_number: body.roll_number.map(|v| v.trim().to_string()),
        guardian_name: body.guardian_name.map(|v| v.trim().to_string()),
        ..Default::default()
    };
    if let Some(ref grade) = body.grade_level {
        profile.grade_level = Some(normalize_grade_level(grade).map_err(invalid)?);
    }
    if let Some(ref section) = body.section {
        profile.section = Some(normalize_section(section).map_err(invalid)?);
    }
    if let Some(dob) = body.date_of_birth {
        validate_date(&dob).map_err(invalid)?;
        profile.date_of_birth = Some(dob.trim().to_string());
    }
    if let Some(phone) = body.guardian_phone {
        validate_phone(&phone).map_err(invalid)?;
        profile.guardian_phone = Some(phone.trim().to_string());
    }
    if let Some(ref email) = body.guardian_email {
        profile.guardian_email = Some(normalize_email(email).map_err(invalid)?);
    }

    Ok((user_update, profile))
}

pub async fn update_student(
    service: &AdminService,
    request: &HttpRequest,
    student_id: i64,
    body: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let (user_update, profile_update) = build_student_update(body).await?;
    let changed_password = user_update.password_hash.is_some();

    let student = storage
        .update_student(admin.school_id, student_id, user_update, profile_update)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;

    invalidate_user_cache(request, student_id).await;
    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "student.update", "student")
            .entity(student_id)
            .details(json!({ "password_changed": changed_password })),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student updated")))
}

/// 软删除：停用账号
pub async fn deactivate_student(
    service: &AdminService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    storage
        .update_student(
            admin.school_id,
            student_id,
            UserUpdate {
                is_active: Some(false),
                ..Default::default()
            },
            StudentProfileUpdate::default(),
        )
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;

    invalidate_user_cache(request, student_id).await;
    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "student.deactivate", "student")
            .entity(student_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deactivated")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ImportStudentRow {
        ImportStudentRow {
            name: " Ada Lovelace ".into(),
            email: "Ada@Example.com".into(),
            grade_level: "10".into(),
            section: "a".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_row_is_normalized() {
        let validated = validate_student_row(&row()).unwrap();
        assert_eq!(validated.name, "Ada Lovelace");
        assert_eq!(validated.email, "ada@example.com");
        assert_eq!(validated.profile.section, "A");
        assert!(validated.password.is_none());
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let mut bad = row();
        bad.email = "not-an-email".into();
        assert!(validate_student_row(&bad).is_err());

        let mut bad = row();
        bad.date_of_birth = Some("2010/01/01".into());
        assert!(validate_student_row(&bad).unwrap_err().contains("Date of birth"));

        let mut bad = row();
        bad.section = "".into();
        assert!(validate_student_row(&bad).is_err());

        let mut bad = row();
        bad.password = Some("short".into());
        assert!(validate_student_row(&bad).is_err());
    }

    #[test]
    fn test_blank_optional_fields_are_dropped() {
        let mut r = row();
        r.guardian_email = Some("   ".into());
        r.roll_number = Some(" 12 ".into());
        let validated = validate_student_row(&r).unwrap();
        assert_eq!(validated.profile.guardian_email, None);
        assert_eq!(validated.profile.roll_number.as_deref(), Some("12"));
    }
}
