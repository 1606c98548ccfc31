use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::{
    alerts::requests::{AlertListParams, CreateAlertRequest},
    assignments::requests::{
        AssignmentListParams, CreateAssignmentRequest, ReviewSubmissionRequest,
        UpdateAssignmentRequest,
    },
    attendance::requests::{AttendanceSheetParams, MarkAttendanceRequest},
    calendar::requests::EventListParams,
    grades::requests::{GradeListParams, RecordGradeRequest},
    teachers::entities::Department,
    users::entities::UserRole,
};
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TEACHER_SERVICE 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

// 作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

pub async fn get_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_assignment(&req, id.0).await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_assignment(&req, id.0, body.into_inner())
        .await
}

pub async fn deactivate_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.deactivate_assignment(&req, id.0).await
}

pub async fn list_submissions(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_submissions(&req, id.0).await
}

pub async fn review_submission(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<ReviewSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .review_submission(&req, id.0, body.into_inner())
        .await
}

// 考勤
pub async fn mark_attendance(
    req: HttpRequest,
    body: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .mark_attendance(&req, body.into_inner())
        .await
}

pub async fn attendance_sheet(
    req: HttpRequest,
    query: web::Query<AttendanceSheetParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .attendance_sheet(&req, query.into_inner())
        .await
}

// 成绩
pub async fn record_grade(
    req: HttpRequest,
    body: web::Json<RecordGradeRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.record_grade(&req, body.into_inner()).await
}

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn list_announcements(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_announcements(&req).await
}

pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_events(&req, query.into_inner()).await
}

// 班主任
pub async fn class_roster(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.class_roster(&req).await
}

pub async fn class_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceSheetParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .class_attendance(&req, query.into_inner())
        .await
}

pub async fn create_alert(
    req: HttpRequest,
    body: web::Json<CreateAlertRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.create_alert(&req, body.into_inner()).await
}

pub async fn class_alerts(
    req: HttpRequest,
    query: web::Query<AlertListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.class_alerts(&req, query.into_inner()).await
}

// 年级协调
pub async fn coordinator_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.coordinator_overview(&req).await
}

pub async fn coordinator_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.coordinator_teachers(&req).await
}

// 教学主任
pub async fn director_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.director_overview(&req).await
}

pub async fn director_alerts(
    req: HttpRequest,
    query: web::Query<AlertListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .director_alerts(&req, query.into_inner())
        .await
}

pub async fn resolve_alert(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.resolve_alert(&req, id.0).await
}

// 科任教师
pub async fn my_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.my_subjects(&req).await
}

// 配置路由（挂在 /api/protected 下，已经过 JWT 校验）
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teachers")
            .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
            // 职能子区域先注册，避免被通用路由吞掉
            .service(
                web::scope("/class-teacher")
                    .wrap(middlewares::RequireDepartment::new(&Department::ClassTeacher))
                    .route("/students", web::get().to(class_roster))
                    .route("/attendance", web::get().to(class_attendance))
                    .service(
                        web::resource("/alerts")
                            .route(web::get().to(class_alerts))
                            .route(web::post().to(create_alert)),
                    ),
            )
            .service(
                web::scope("/coordinator")
                    .wrap(middlewares::RequireDepartment::new(&Department::Coordinator))
                    .route("/overview", web::get().to(coordinator_overview))
                    .route("/teachers", web::get().to(coordinator_teachers)),
            )
            .service(
                web::scope("/director")
                    .wrap(middlewares::RequireDepartment::new(&Department::Director))
                    .route("/overview", web::get().to(director_overview))
                    .route("/alerts", web::get().to(director_alerts))
                    .route("/alerts/{id}/resolve", web::put().to(resolve_alert)),
            )
            .service(
                web::scope("/subject-teacher")
                    .wrap(middlewares::RequireDepartment::new(&Department::SubjectTeacher))
                    .route("/subjects", web::get().to(my_subjects)),
            )
            .service(
                web::resource("/assignments")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/assignments/{id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(deactivate_assignment)),
            )
            .route("/assignments/{id}/submissions", web::get().to(list_submissions))
            .route("/submissions/{id}/review", web::put().to(review_submission))
            .service(
                web::resource("/attendance")
                    .route(web::get().to(attendance_sheet))
                    .route(web::post().to(mark_attendance)),
            )
            .service(
                web::resource("/grades")
                    .route(web::get().to(list_grades))
                    .route(web::post().to(record_grade)),
            )
            .route("/announcements", web::get().to(list_announcements))
            .route("/events", web::get().to(list_events)),
    );
}
