use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, calendar::requests::EventListParams};
use crate::services::{current_user, list_announcements_for, list_events_for};

pub async fn list_announcements(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let announcements = list_announcements_for(&storage, &user, None).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(announcements, "Announcements retrieved")))
}

pub async fn list_events(
    service: &StudentService,
    request: &HttpRequest,
    params: EventListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let events = list_events_for(&storage, user.school_id, params).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(events, "Events retrieved")))
}
