use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 公告受众
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "announcement.ts")]
pub enum Audience {
    All,
    Teachers,
    Students,
}

impl Audience {
    /// 某个角色能看到的受众范围
    pub fn visible_to(role: &UserRole) -> &'static [Audience] {
        match role {
            UserRole::Admin => &[Audience::All, Audience::Teachers, Audience::Students],
            UserRole::Teacher => &[Audience::All, Audience::Teachers],
            UserRole::Student => &[Audience::All, Audience::Students],
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Audience::All => "all",
            Audience::Teachers => "teachers",
            Audience::Students => "students",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Audience::All),
            "teachers" => Ok(Audience::Teachers),
            "students" => Ok(Audience::Students),
            _ => Err(format!("Invalid audience: {s}")),
        }
    }
}

// 公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub school_id: i64,
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub created_by: i64,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility() {
        assert!(!Audience::visible_to(&UserRole::Student).contains(&Audience::Teachers));
        assert!(Audience::visible_to(&UserRole::Teacher).contains(&Audience::All));
        assert_eq!(Audience::visible_to(&UserRole::Admin).len(), 3);
    }
}
