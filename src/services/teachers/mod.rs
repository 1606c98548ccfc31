pub mod assignments;
pub mod attendance;
pub mod class_teacher;
pub mod coordinator;
pub mod director;
pub mod grades;
pub mod notices;
mod stats;
pub mod subject_teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    alerts::requests::{AlertListParams, CreateAlertRequest},
    assignments::requests::{
        AssignmentListParams, CreateAssignmentRequest, ReviewSubmissionRequest,
        UpdateAssignmentRequest,
    },
    attendance::requests::{AttendanceSheetParams, MarkAttendanceRequest},
    calendar::requests::EventListParams,
    grades::requests::{GradeListParams, RecordGradeRequest},
};
use crate::storage::Storage;

/// 教师服务（含各职能子区域）
pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from(request),
        }
    }

    // 作业
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        params: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        assignments::list_assignments(self, request, params).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        body: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::create_assignment(self, request, body).await
    }

    pub async fn get_assignment(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        assignments::get_assignment(self, request, id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::update_assignment(self, request, id, body).await
    }

    pub async fn deactivate_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        assignments::deactivate_assignment(self, request, id).await
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        assignments::list_submissions(self, request, assignment_id).await
    }

    pub async fn review_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        body: ReviewSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::review_submission(self, request, submission_id, body).await
    }

    // 考勤
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        body: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::mark_attendance(self, request, body).await
    }

    pub async fn attendance_sheet(
        &self,
        request: &HttpRequest,
        params: AttendanceSheetParams,
    ) -> ActixResult<HttpResponse> {
        attendance::attendance_sheet(self, request, params).await
    }

    // 成绩
    pub async fn record_grade(
        &self,
        request: &HttpRequest,
        body: RecordGradeRequest,
    ) -> ActixResult<HttpResponse> {
        grades::record_grade(self, request, body).await
    }

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        params: GradeListParams,
    ) -> ActixResult<HttpResponse> {
        grades::list_grades(self, request, params).await
    }

    // 公告与校历
    pub async fn list_announcements(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        notices::list_announcements(self, request).await
    }

    pub async fn list_events(
        &self,
        request: &HttpRequest,
        params: EventListParams,
    ) -> ActixResult<HttpResponse> {
        notices::list_events(self, request, params).await
    }

    // 班主任
    pub async fn class_roster(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        class_teacher::class_roster(self, request).await
    }

    pub async fn class_attendance(
        &self,
        request: &HttpRequest,
        params: AttendanceSheetParams,
    ) -> ActixResult<HttpResponse> {
        class_teacher::class_attendance(self, request, params).await
    }

    pub async fn create_alert(
        &self,
        request: &HttpRequest,
        body: CreateAlertRequest,
    ) -> ActixResult<HttpResponse> {
        class_teacher::create_alert(self, request, body).await
    }

    pub async fn class_alerts(
        &self,
        request: &HttpRequest,
        params: AlertListParams,
    ) -> ActixResult<HttpResponse> {
        class_teacher::class_alerts(self, request, params).await
    }

    // 年级协调
    pub async fn coordinator_overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        coordinator::overview(self, request).await
    }

    pub async fn coordinator_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        coordinator::teachers(self, request).await
    }

    // 教学主任
    pub async fn director_overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        director::overview(self, request).await
    }

    pub async fn director_alerts(
        &self,
        request: &HttpRequest,
        params: AlertListParams,
    ) -> ActixResult<HttpResponse> {
        director::list_alerts(self, request, params).await
    }

    pub async fn resolve_alert(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        director::resolve_alert(self, request, id).await
    }

    // 科任教师
    pub async fn my_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subject_teacher::my_subjects(self, request).await
    }
}
