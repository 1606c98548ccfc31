pub mod activity;
pub mod announcements;
pub mod audit;
pub mod dashboard;
pub mod events;
pub mod import;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod timetable;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
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
};
use crate::storage::Storage;

/// 学校管理员服务
pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 看板
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request).await
    }

    // 最近动态
    pub async fn activity(
        &self,
        request: &HttpRequest,
        params: ActivityParams,
    ) -> ActixResult<HttpResponse> {
        activity::activity_feed(self, request, params).await
    }

    // 审计日志
    pub async fn list_audit_logs(
        &self,
        request: &HttpRequest,
        params: AuditLogListParams,
    ) -> ActixResult<HttpResponse> {
        audit::list_audit_logs(self, request, params).await
    }

    // 学生管理
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        params: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        students::list_students(self, request, params).await
    }

    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        students::get_student(self, request, id).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        body: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        students::create_student(self, request, body).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        students::update_student(self, request, id, body).await
    }

    pub async fn deactivate_student(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        students::deactivate_student(self, request, id).await
    }

    // 批量导入
    pub async fn import_students(
        &self,
        request: &HttpRequest,
        body: ImportStudentsRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_students(self, request, body).await
    }

    pub async fn import_students_file(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        import::import_students_file(self, request, payload).await
    }

    // 教师管理
    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        params: TeacherListParams,
    ) -> ActixResult<HttpResponse> {
        teachers::list_teachers(self, request, params).await
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        body: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::create_teacher(self, request, body).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::update_teacher(self, request, id, body).await
    }

    pub async fn deactivate_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        teachers::deactivate_teacher(self, request, id).await
    }

    // 科目管理
    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        params: SubjectListParams,
    ) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, request, params).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        body: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::create_subject(self, request, body).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::update_subject(self, request, id, body).await
    }

    pub async fn deactivate_subject(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        subjects::deactivate_subject(self, request, id).await
    }

    pub async fn assign_teacher(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        body: AssignTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::assign_teacher(self, request, subject_id, body).await
    }

    // 公告
    pub async fn list_announcements(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        announcements::list_announcements(self, request).await
    }

    pub async fn create_announcement(
        &self,
        request: &HttpRequest,
        body: CreateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        announcements::create_announcement(self, request, body).await
    }

    pub async fn deactivate_announcement(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        announcements::deactivate_announcement(self, request, id).await
    }

    // 校历
    pub async fn list_events(
        &self,
        request: &HttpRequest,
        params: EventListParams,
    ) -> ActixResult<HttpResponse> {
        events::list_events(self, request, params).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        body: CreateEventRequest,
    ) -> ActixResult<HttpResponse> {
        events::create_event(self, request, body).await
    }

    pub async fn update_event(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateEventRequest,
    ) -> ActixResult<HttpResponse> {
        events::update_event(self, request, id, body).await
    }

    pub async fn delete_event(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        events::delete_event(self, request, id).await
    }

    // 课表
    pub async fn get_timetable(
        &self,
        request: &HttpRequest,
        params: TimetableParams,
    ) -> ActixResult<HttpResponse> {
        timetable::get_timetable(self, request, params).await
    }

    pub async fn upsert_timetable(
        &self,
        request: &HttpRequest,
        body: UpsertTimetableRequest,
    ) -> ActixResult<HttpResponse> {
        timetable::upsert_timetable(self, request, body).await
    }
}
