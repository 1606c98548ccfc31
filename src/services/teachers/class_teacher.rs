use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use super::attendance::{build_sheet, sheet_date};
use super::stats::roster_entries;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    alerts::requests::{AlertListParams, AlertListQuery, CreateAlertRequest, NewAlert},
    attendance::requests::{AttendanceQuery, AttendanceSheetParams},
    reports::responses::ClassRoster,
    students::entities::Student,
    teachers::entities::TeacherProfile,
    users::entities::User,
};
use crate::services::{current_teacher_profile, current_user};
use crate::storage::Storage;

const MAX_ALERT_MESSAGE: usize = 1000;

/// 班主任负责的班级
fn homeroom(profile: &TeacherProfile) -> Result<(String, String)> {
    profile
        .homeroom()
        .map(|(grade, section)| (grade.to_string(), section.to_string()))
        .ok_or_else(|| CampusError::authorization("No class is assigned to this class teacher"))
}

async fn own_class(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    teacher: &User,
) -> Result<(String, String, Vec<Student>)> {
    let profile = current_teacher_profile(storage, request, teacher).await?;
    let (grade_level, section) = homeroom(&profile)?;
    let students = storage
        .list_class_students(teacher.school_id, &grade_level, Some(&section))
        .await?;
    Ok((grade_level, section, students))
}

pub async fn class_roster(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    let (grade_level, section, students) = own_class(&storage, request, &teacher).await?;

    let ids: Vec<i64> = students.iter().map(Student::id).collect();
    let (attendance, grades) = futures_util::try_join!(
        storage.list_attendance(
            teacher.school_id,
            AttendanceQuery {
                student_ids: Some(ids.clone()),
                ..Default::default()
            },
        ),
        storage.list_grades_for_students(teacher.school_id, &ids),
    )?;

    let roster = ClassRoster {
        grade_level,
        section,
        students: roster_entries(students, &attendance, &grades),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(roster, "Class roster retrieved")))
}

pub async fn class_attendance(
    service: &TeacherService,
    request: &HttpRequest,
    params: AttendanceSheetParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    let date = sheet_date(params.date)?;
    let (_, _, students) = own_class(&storage, request, &teacher).await?;

    let sheet = build_sheet(&storage, teacher.school_id, date, students).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(sheet, "Class attendance retrieved")))
}

pub async fn create_alert(
    service: &TeacherService,
    request: &HttpRequest,
    body: CreateAlertRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let message = body.message.trim().to_string();
    if message.is_empty() || message.chars().count() > MAX_ALERT_MESSAGE {
        return Err(CampusError::validation(format!(
            "Message must be 1-{MAX_ALERT_MESSAGE} characters"
        ))
        .into());
    }

    let profile = current_teacher_profile(&storage, request, &teacher).await?;
    let (grade_level, section) = homeroom(&profile)?;
    let student = storage
        .get_student_profile(teacher.school_id, body.student_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Student not found"))?;
    if !student.in_class(&grade_level, &section) {
        return Err(CampusError::authorization("Student is not in your class").into());
    }

    let alert = storage
        .create_alert(NewAlert {
            school_id: teacher.school_id,
            student_id: body.student_id,
            raised_by: teacher.id,
            alert_type: body.alert_type,
            severity: body.severity,
            message,
        })
        .await?;

    tracing::info!(
        "Class teacher {} raised {} alert for student {}",
        teacher.id,
        alert.severity,
        alert.student_id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(alert, "Alert created")))
}

pub async fn class_alerts(
    service: &TeacherService,
    request: &HttpRequest,
    params: AlertListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;
    let (_, _, students) = own_class(&storage, request, &teacher).await?;

    let alerts = storage
        .list_alerts(
            teacher.school_id,
            AlertListQuery {
                resolved: params.resolved,
                severity: params.severity,
                student_ids: Some(students.iter().map(Student::id).collect()),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(alerts, "Alerts retrieved")))
}
