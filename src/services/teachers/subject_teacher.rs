use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::services::current_user;

/// 本人的任课安排（带学生人数）
pub async fn my_subjects(service: &TeacherService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let subjects: Vec<_> = storage
        .list_teaching_assignments(teacher.school_id, Some(teacher.id))
        .await?
        .into_iter()
        .map(|(_, assignment)| assignment)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(subjects, "Subjects retrieved")))
}
