use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "calendar.ts")]
pub enum EventType {
    Holiday,
    Exam,
    Meeting,
    Activity,
    Other,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventType::Holiday => "holiday",
            EventType::Exam => "exam",
            EventType::Meeting => "meeting",
            EventType::Activity => "activity",
            EventType::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "holiday" => Ok(EventType::Holiday),
            "exam" => Ok(EventType::Exam),
            "meeting" => Ok(EventType::Meeting),
            "activity" => Ok(EventType::Activity),
            "other" => Ok(EventType::Other),
            _ => Err(format!("Invalid event type: {s}")),
        }
    }
}

// 校历事件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "calendar.ts")]
pub struct CalendarEvent {
    pub id: i64,
    pub school_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    // YYYY-MM-DD
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
