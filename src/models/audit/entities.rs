use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 审计日志
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AuditLog {
    pub id: i64,
    pub school_id: i64,
    pub user_id: i64,
    // 例如 student.create
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    #[ts(type = "unknown")]
    pub details: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub school_id: i64,
    pub user_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub details: Option<serde_json::Value>,
}

impl NewAuditLog {
    pub fn new(school_id: i64, user_id: i64, action: &str, entity_type: &str) -> Self {
        Self {
            school_id,
            user_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: None,
            details: None,
        }
    }

    pub fn entity(mut self, entity_id: i64) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AuditLogListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub action: Option<String>,
    #[serde(default, deserialize_with = "crate::models::common::lenient::opt_i64")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub action: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AuditLogListResponse {
    pub items: Vec<AuditLog>,
    pub pagination: crate::models::common::PaginationInfo,
}
