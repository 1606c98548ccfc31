use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use super::stats::{WINDOW_DAYS, alert_counts, subject_performance, window_start};
use crate::errors::CampusError;
use crate::models::{
    ApiResponse,
    alerts::requests::{AlertListParams, AlertListQuery},
    attendance::{entities::AttendanceSummary, requests::AttendanceQuery},
    grades::{entities::average_percentage, requests::GradeListQuery},
    reports::responses::DirectorOverview,
};
use crate::services::current_user;

pub async fn overview(service: &TeacherService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let school_id = user.school_id;

    let (students, teachers, active_assignments, attendance, grades, alerts) = futures_util::try_join!(
        storage.count_students(school_id),
        storage.count_teachers(school_id),
        storage.count_active_assignments(school_id),
        storage.list_attendance(
            school_id,
            AttendanceQuery {
                from: Some(window_start(WINDOW_DAYS)),
                ..Default::default()
            },
        ),
        storage.list_grades(school_id, GradeListQuery::default()),
        storage.count_open_alerts(school_id),
    )?;

    let overview = DirectorOverview {
        students,
        teachers,
        active_assignments,
        attendance_rate: AttendanceSummary::from_statuses(attendance.iter().map(|r| &r.status))
            .rate,
        average_grade: average_percentage(grades.iter().map(|g| &g.grade)),
        subject_performance: subject_performance(&grades),
        open_alerts: alert_counts(&alerts),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(overview, "Overview retrieved")))
}

pub async fn list_alerts(
    service: &TeacherService,
    request: &HttpRequest,
    params: AlertListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let alerts = storage
        .list_alerts(
            user.school_id,
            AlertListQuery {
                resolved: params.resolved,
                severity: params.severity,
                student_ids: None,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(alerts, "Alerts retrieved")))
}

pub async fn resolve_alert(
    service: &TeacherService,
    request: &HttpRequest,
    alert_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let alert = storage
        .resolve_alert(user.school_id, alert_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Alert not found"))?;

    tracing::info!("Director {} resolved alert {}", user.id, alert.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(alert, "Alert resolved")))
}
