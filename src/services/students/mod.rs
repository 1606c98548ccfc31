pub mod assignments;
pub mod autograde;
pub mod dashboard;
pub mod notices;
pub mod records;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{CampusError, Result};
use crate::models::{
    assignments::requests::{AssignmentListParams, SubmitAssignmentRequest},
    attendance::requests::AttendanceRangeParams,
    calendar::requests::EventListParams,
    grades::requests::GradeListParams,
    students::entities::StudentProfile,
    users::entities::User,
};
use crate::storage::Storage;

/// 学生服务
pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

/// 当前学生的档案
pub(crate) async fn own_profile(storage: &Arc<dyn Storage>, user: &User) -> Result<StudentProfile> {
    storage
        .get_student_profile(user.school_id, user.id)
        .await?
        .ok_or_else(|| CampusError::not_found("Student profile not found"))
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from(request),
        }
    }

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request).await
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        params: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        assignments::list_assignments(self, request, params).await
    }

    pub async fn get_assignment(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        assignments::get_assignment(self, request, id).await
    }

    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
        body: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::submit_assignment(self, request, id, body).await
    }

    pub async fn my_grades(
        &self,
        request: &HttpRequest,
        params: GradeListParams,
    ) -> ActixResult<HttpResponse> {
        records::my_grades(self, request, params).await
    }

    pub async fn my_attendance(
        &self,
        request: &HttpRequest,
        params: AttendanceRangeParams,
    ) -> ActixResult<HttpResponse> {
        records::my_attendance(self, request, params).await
    }

    pub async fn my_timetable(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        records::my_timetable(self, request).await
    }

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
}
