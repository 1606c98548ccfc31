use serde::Deserialize;
use ts_rs::TS;

use super::entities::Audience;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_audience")]
    pub audience: Audience,
}

fn default_audience() -> Audience {
    Audience::All
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub school_id: i64,
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub created_by: i64,
}
