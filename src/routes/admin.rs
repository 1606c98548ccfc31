use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::{
    activity::entities::ActivityParams,
    announcements::requests::CreateAnnouncementRequest,
    audit::entities::AuditLogListParams,
    calendar::requests::{CreateEventRequest, EventListParams, UpdateEventRequest},
    students::requests::{
        CreateStudentRequest, ImportStudentsRequest, StudentListParams, UpdateStudentRequest,
    },
    subjects::requests::{
        AssignTeacherRequest, CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
    },
    teachers::requests::{CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest},
    timetable::requests::{TimetableParams, UpsertTimetableRequest},
    users::entities::UserRole,
};
use crate::services::AdminService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ADMIN_SERVICE 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

// 看板与日志
pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.dashboard(&req).await
}

pub async fn activity(
    req: HttpRequest,
    query: web::Query<ActivityParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.activity(&req, query.into_inner()).await
}

pub async fn list_audit_logs(
    req: HttpRequest,
    query: web::Query<AuditLogListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_audit_logs(&req, query.into_inner()).await
}

// 学生
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_student(&req, body.into_inner()).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_student(&req, id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_student(&req, id.0, body.into_inner())
        .await
}

pub async fn deactivate_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.deactivate_student(&req, id.0).await
}

pub async fn import_students(
    req: HttpRequest,
    body: web::Json<ImportStudentsRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.import_students(&req, body.into_inner()).await
}

pub async fn import_students_file(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.import_students_file(&req, payload).await
}

// 教师
pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_teachers(&req, query.into_inner()).await
}

pub async fn create_teacher(
    req: HttpRequest,
    body: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_teacher(&req, body.into_inner()).await
}

pub async fn update_teacher(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_teacher(&req, id.0, body.into_inner())
        .await
}

pub async fn deactivate_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.deactivate_teacher(&req, id.0).await
}

// 科目
pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_subjects(&req, query.into_inner()).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_subject(&req, body.into_inner()).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_subject(&req, id.0, body.into_inner())
        .await
}

pub async fn deactivate_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.deactivate_subject(&req, id.0).await
}

pub async fn assign_teacher(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AssignTeacherRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .assign_teacher(&req, id.0, body.into_inner())
        .await
}

// 公告
pub async fn list_announcements(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_announcements(&req).await
}

pub async fn create_announcement(
    req: HttpRequest,
    body: web::Json<CreateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .create_announcement(&req, body.into_inner())
        .await
}

pub async fn deactivate_announcement(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.deactivate_announcement(&req, id.0).await
}

// 校历
pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_events(&req, query.into_inner()).await
}

pub async fn create_event(
    req: HttpRequest,
    body: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_event(&req, body.into_inner()).await
}

pub async fn update_event(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_event(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_event(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.delete_event(&req, id.0).await
}

// 课表
pub async fn get_timetable(
    req: HttpRequest,
    query: web::Query<TimetableParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_timetable(&req, query.into_inner()).await
}

pub async fn upsert_timetable(
    req: HttpRequest,
    body: web::Json<UpsertTimetableRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .upsert_timetable(&req, body.into_inner())
        .await
}

// 配置路由（挂在 /api/protected 下，已经过 JWT 校验）
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .route("/dashboard", web::get().to(dashboard))
            .route("/activity", web::get().to(activity))
            .route("/audit-logs", web::get().to(list_audit_logs))
            .service(
                web::resource("/students")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .route("/students/import", web::post().to(import_students))
            .route("/students/import/file", web::post().to(import_students_file))
            .service(
                web::resource("/students/{id}")
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(deactivate_student)),
            )
            .service(
                web::resource("/teachers")
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher)),
            )
            .service(
                web::resource("/teachers/{id}")
                    .route(web::put().to(update_teacher))
                    .route(web::delete().to(deactivate_teacher)),
            )
            .service(
                web::resource("/subjects")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject)),
            )
            .service(
                web::resource("/subjects/{id}")
                    .route(web::put().to(update_subject))
                    .route(web::delete().to(deactivate_subject)),
            )
            .route("/subjects/{id}/teachers", web::post().to(assign_teacher))
            .service(
                web::resource("/announcements")
                    .route(web::get().to(list_announcements))
                    .route(web::post().to(create_announcement)),
            )
            .route(
                "/announcements/{id}",
                web::delete().to(deactivate_announcement),
            )
            .service(
                web::resource("/events")
                    .route(web::get().to(list_events))
                    .route(web::post().to(create_event)),
            )
            .service(
                web::resource("/events/{id}")
                    .route(web::put().to(update_event))
                    .route(web::delete().to(delete_event)),
            )
            .service(
                web::resource("/timetable")
                    .route(web::get().to(get_timetable))
                    .route(web::put().to(upsert_timetable)),
            ),
    );
}
