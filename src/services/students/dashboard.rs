use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, own_profile};
use crate::models::{
    ApiResponse,
    attendance::{entities::AttendanceSummary, requests::AttendanceQuery},
    calendar::requests::EventListQuery,
    grades::entities::average_percentage,
    reports::responses::StudentDashboard,
};
use crate::services::{current_user, list_announcements_for, today};

const DASHBOARD_ITEMS: u64 = 5;

pub async fn dashboard(service: &StudentService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;
    let profile = own_profile(&storage, &student).await?;
    let school_id = student.school_id;
    let student_ids = [student.id];

    let (assignments, submissions, attendance, grades, upcoming_events, recent_announcements) = futures_util::try_join!(
        storage.list_active_assignments(school_id, Some(profile.grade_level.as_str())),
        storage.list_student_submissions(school_id, student.id),
        storage.list_attendance(
            school_id,
            AttendanceQuery {
                student_ids: Some(vec![student.id]),
                ..Default::default()
            },
        ),
        storage.list_grades_for_students(school_id, &student_ids),
        storage.list_events(
            school_id,
            EventListQuery {
                from: Some(today()),
                limit: Some(DASHBOARD_ITEMS),
                ..Default::default()
            },
        ),
        list_announcements_for(&storage, &student, Some(DASHBOARD_ITEMS)),
    )?;

    let submitted: HashSet<i64> = submissions.iter().map(|s| s.assignment_id).collect();
    let pending_assignments = assignments
        .into_iter()
        .filter(|a| a.targets(&profile.grade_level, &profile.section) && !submitted.contains(&a.id))
        .map(|a| a.without_answers())
        .collect();

    let dashboard = StudentDashboard {
        pending_assignments,
        attendance_rate: AttendanceSummary::from_statuses(attendance.iter().map(|r| &r.status))
            .rate,
        average_grade: average_percentage(grades.iter()),
        upcoming_events,
        recent_announcements,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Dashboard retrieved")))
}
