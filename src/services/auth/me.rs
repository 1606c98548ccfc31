use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, auth::CurrentUserResponse, users::entities::UserRole};
use crate::services::current_user;

use super::AuthService;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let (teacher_profile, student_profile) = match user.role {
        UserRole::Teacher => (
            storage.get_teacher_profile(user.school_id, user.id).await?,
            None,
        ),
        UserRole::Student => (
            None,
            storage.get_student_profile(user.school_id, user.id).await?,
        ),
        UserRole::Admin => (None, None),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CurrentUserResponse {
            user,
            teacher_profile,
            student_profile,
        },
        "Current user",
    )))
}
