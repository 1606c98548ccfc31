use serde::Deserialize;
use ts_rs::TS;

use super::entities::EventType;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "calendar.ts")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "calendar.ts")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// 事件查询：默认返回今天起的事件
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "calendar.ts")]
pub struct EventListParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub event_type: Option<EventType>,
}

#[derive(Debug, Clone, Default)]
pub struct EventListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub event_type: Option<EventType>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub school_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_by: i64,
}
