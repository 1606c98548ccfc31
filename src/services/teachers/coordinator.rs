use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use super::stats::{WINDOW_DAYS, class_overviews, window_start};
use crate::models::{
    ApiResponse,
    attendance::requests::AttendanceQuery,
    reports::responses::CoordinatorOverview,
    students::entities::Student,
    teachers::{requests::TeacherListQuery, responses::TeacherWithSubjects},
};
use crate::services::current_user;

pub async fn overview(service: &TeacherService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let school_id = user.school_id;

    let (students, assignments, attendance) = futures_util::try_join!(
        storage.list_active_students(school_id),
        storage.list_active_assignments(school_id, None),
        storage.list_attendance(
            school_id,
            AttendanceQuery {
                from: Some(window_start(WINDOW_DAYS)),
                ..Default::default()
            },
        ),
    )?;

    let student_ids: Vec<i64> = students.iter().map(Student::id).collect();
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let (submissions, grades) = futures_util::try_join!(
        storage.list_submission_keys(school_id, &assignment_ids),
        storage.list_grades_for_students(school_id, &student_ids),
    )?;

    let classes = class_overviews(&students, &attendance, &assignments, &submissions, &grades);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CoordinatorOverview { classes },
        "Overview retrieved",
    )))
}

pub async fn teachers(service: &TeacherService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let (teachers, assignments) = futures_util::try_join!(
        storage.list_teachers(
            user.school_id,
            TeacherListQuery {
                size: Some(100),
                ..Default::default()
            },
        ),
        storage.list_teaching_assignments(user.school_id, None),
    )?;

    let mut by_teacher: HashMap<i64, Vec<_>> = HashMap::new();
    for (teacher_id, assignment) in assignments {
        by_teacher.entry(teacher_id).or_default().push(assignment);
    }

    let items: Vec<TeacherWithSubjects> = teachers
        .items
        .into_iter()
        .map(|teacher| TeacherWithSubjects {
            subjects: by_teacher.remove(&teacher.user.id).unwrap_or_default(),
            teacher,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(items, "Teachers retrieved")))
}
