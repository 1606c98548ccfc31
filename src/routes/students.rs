use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::{
    assignments::requests::{AssignmentListParams, SubmitAssignmentRequest},
    attendance::requests::AttendanceRangeParams,
    calendar::requests::EventListParams,
    grades::requests::GradeListParams,
    users::entities::UserRole,
};
use crate::services::StudentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 STUDENT_SERVICE 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.dashboard(&req).await
}

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

pub async fn get_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_assignment(&req, id.0).await
}

pub async fn submit_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .submit_assignment(&req, id.0, body.into_inner())
        .await
}

pub async fn my_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_grades(&req, query.into_inner()).await
}

pub async fn my_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceRangeParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_attendance(&req, query.into_inner()).await
}

pub async fn my_timetable(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_timetable(&req).await
}

pub async fn list_announcements(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_announcements(&req).await
}

pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_events(&req, query.into_inner()).await
}

// 配置路由（挂在 /api/protected 下，已经过 JWT 校验）
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/students")
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .route("/dashboard", web::get().to(dashboard))
            .route("/assignments", web::get().to(list_assignments))
            .route("/assignments/{id}", web::get().to(get_assignment))
            .route("/assignments/{id}/submit", web::post().to(submit_assignment))
            .route("/grades", web::get().to(my_grades))
            .route("/attendance", web::get().to(my_attendance))
            .route("/timetable", web::get().to(my_timetable))
            .route("/announcements", web::get().to(list_announcements))
            .route("/events", web::get().to(list_events)),
    );
}
