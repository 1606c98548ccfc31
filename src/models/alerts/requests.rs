use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AlertSeverity, AlertType};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "alert.ts")]
pub struct CreateAlertRequest {
    pub student_id: i64,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "alert.ts")]
pub struct AlertListParams {
    pub resolved: Option<bool>,
    pub severity: Option<AlertSeverity>,
}

// 预警查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AlertListQuery {
    pub resolved: Option<bool>,
    pub severity: Option<AlertSeverity>,
    pub student_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub school_id: i64,
    pub student_id: i64,
    pub raised_by: i64,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
}
