use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "alert.ts")]
pub enum AlertType {
    Academic,
    Attendance,
    Behavior,
    Health,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "alert.ts")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

macro_rules! string_enum {
    ($ty:ident { $($variant:ident => $s:literal),* $(,)? }) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($ty::$variant => write!(f, $s),)*
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($ty::$variant),)*
                    _ => Err(format!(concat!("Invalid ", stringify!($ty), ": {}"), s)),
                }
            }
        }
    };
}

string_enum!(AlertType {
    Academic => "academic",
    Attendance => "attendance",
    Behavior => "behavior",
    Health => "health",
    Other => "other",
});

string_enum!(AlertSeverity {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

impl AlertSeverity {
    pub fn all() -> [AlertSeverity; 4] {
        [
            AlertSeverity::Low,
            AlertSeverity::Medium,
            AlertSeverity::High,
            AlertSeverity::Critical,
        ]
    }
}

// 学生预警
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "alert.ts")]
pub struct StudentAlert {
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub raised_by: i64,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub is_resolved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 预警（附带学生信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "alert.ts")]
pub struct AlertView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub alert: StudentAlert,
    pub student_name: String,
    pub grade_level: Option<String>,
    pub section: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_and_order() {
        assert_eq!("high".parse::<AlertSeverity>().unwrap(), AlertSeverity::High);
        assert!(AlertSeverity::Critical > AlertSeverity::Low);
        assert_eq!(AlertType::Behavior.to_string(), "behavior");
        assert!("urgent".parse::<AlertSeverity>().is_err());
    }
}
