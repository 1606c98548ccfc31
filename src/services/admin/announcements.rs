use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::AdminService;
use crate::errors::CampusError;
use crate::models::{
    ApiResponse,
    announcements::{
        entities::Audience,
        requests::{CreateAnnouncementRequest, NewAnnouncement},
    },
    audit::entities::NewAuditLog,
};
use crate::services::{current_user, record_audit};

pub async fn list_announcements(
    service: &AdminService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let announcements = storage
        .list_announcements(
            user.school_id,
            Audience::visible_to(&user.role),
            None,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(announcements, "Announcements retrieved")))
}

pub async fn create_announcement(
    service: &AdminService,
    request: &HttpRequest,
    body: CreateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let title = body.title.trim().to_string();
    let content = body.content.trim().to_string();
    if title.is_empty() || title.chars().count() > 200 {
        return Err(CampusError::validation("Title must be 1-200 characters").into());
    }
    if content.is_empty() {
        return Err(CampusError::validation("Content is required").into());
    }

    let announcement = storage
        .create_announcement(NewAnnouncement {
            school_id: admin.school_id,
            title,
            content,
            audience: body.audience,
            created_by: admin.id,
        })
        .await?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "announcement.create", "announcement")
            .entity(announcement.id)
            .details(json!({ "audience": announcement.audience.to_string() })),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(announcement, "Announcement created")))
}

pub async fn deactivate_announcement(
    service: &AdminService,
    request: &HttpRequest,
    announcement_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    if !storage
        .deactivate_announcement(admin.school_id, announcement_id)
        .await?
    {
        return Err(CampusError::not_found("Announcement not found").into());
    }

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "announcement.deactivate", "announcement")
            .entity(announcement_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Announcement removed")))
}
