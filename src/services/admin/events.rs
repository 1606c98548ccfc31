use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::AdminService;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    audit::entities::NewAuditLog,
    calendar::requests::{CreateEventRequest, EventListParams, NewEvent, UpdateEventRequest},
};
use crate::services::{current_user, invalid, list_events_for, record_audit};
use crate::utils::validate::{parse_date, trim_optional};

/// 结束日期不得早于开始日期
fn check_range(start: &str, end: Option<&str>) -> Result<()> {
    let start = parse_date(start).map_err(invalid)?;
    if let Some(end) = end {
        let end = parse_date(end).map_err(invalid)?;
        if end < start {
            return Err(CampusError::validation("end_date must not be before start_date"));
        }
    }
    Ok(())
}

fn check_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 200 {
        return Err(CampusError::validation("Title must be 1-200 characters"));
    }
    Ok(title.to_string())
}

pub async fn list_events(
    service: &AdminService,
    request: &HttpRequest,
    params: EventListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let events = list_events_for(&storage, user.school_id, params).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(events, "Events retrieved")))
}

pub async fn create_event(
    service: &AdminService,
    request: &HttpRequest,
    body: CreateEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let title = check_title(&body.title)?;
    let start_date = body.start_date.trim().to_string();
    let end_date = trim_optional(body.end_date);
    check_range(&start_date, end_date.as_deref())?;

    let event = storage
        .create_event(NewEvent {
            school_id: admin.school_id,
            title,
            description: trim_optional(body.description),
            event_type: body.event_type,
            start_date,
            end_date,
            created_by: admin.id,
        })
        .await?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "event.create", "calendar_event")
            .entity(event.id)
            .details(json!({ "start_date": event.start_date })),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(event, "Event created")))
}

pub async fn update_event(
    service: &AdminService,
    request: &HttpRequest,
    event_id: i64,
    body: UpdateEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let current = storage
        .get_event(admin.school_id, event_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Event not found"))?;

    let title = match body.title {
        Some(ref title) => Some(check_title(title)?),
        None => None,
    };
    let start_date = body.start_date.map(|d| d.trim().to_string());
    let end_date = body.end_date.map(|d| d.trim().to_string());
    check_range(
        start_date.as_deref().unwrap_or(&current.start_date),
        end_date.as_deref().or(current.end_date.as_deref()),
    )?;

    let event = storage
        .update_event(
            admin.school_id,
            event_id,
            UpdateEventRequest {
                title,
                description: body.description.map(|d| d.trim().to_string()),
                event_type: body.event_type,
                start_date,
                end_date,
            },
        )
        .await?
        .ok_or_else(|| CampusError::not_found("Event not found"))?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "event.update", "calendar_event")
            .entity(event_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(event, "Event updated")))
}

pub async fn delete_event(
    service: &AdminService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    if !storage.delete_event(admin.school_id, event_id).await? {
        return Err(CampusError::not_found("Event not found").into());
    }

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "event.delete", "calendar_event")
            .entity(event_id),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Event deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_check() {
        assert!(check_range("2025-09-01", None).is_ok());
        assert!(check_range("2025-09-01", Some("2025-09-03")).is_ok());
        assert!(check_range("2025-09-03", Some("2025-09-01")).is_err());
        assert!(check_range("09/01/2025", None).is_err());
    }

    #[test]
    fn test_title_check() {
        assert_eq!(check_title("  Sports Day ").unwrap(), "Sports Day");
        assert!(check_title("   ").is_err());
    }
}
