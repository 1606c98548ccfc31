use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{
    ApiResponse,
    attendance::{entities::AttendanceSummary, requests::AttendanceQuery},
    reports::responses::AdminDashboard,
};
use crate::services::{current_user, today};

/// 管理员看板：各项统计并发查询
pub async fn dashboard(service: &AdminService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let school_id = user.school_id;
    let today = today();

    let (students, teachers, subjects, active_assignments, attendance, alerts) = futures_util::try_join!(
        storage.count_students(school_id),
        storage.count_teachers(school_id),
        storage.count_subjects(school_id),
        storage.count_active_assignments(school_id),
        storage.list_attendance(
            school_id,
            AttendanceQuery {
                student_ids: None,
                from: Some(today.clone()),
                to: Some(today.clone()),
            },
        ),
        storage.count_open_alerts(school_id),
    )?;

    let summary = AttendanceSummary::from_statuses(attendance.iter().map(|r| &r.status));
    let dashboard = AdminDashboard {
        students,
        teachers,
        subjects,
        active_assignments,
        today_attendance_rate: summary.rate,
        open_alerts: alerts.iter().map(|(_, count)| count).sum(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Dashboard retrieved")))
}
