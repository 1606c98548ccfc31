use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::User;

// 教师职能（部门）
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "teacher.ts")]
pub enum Department {
    ClassTeacher,   // 班主任
    Coordinator,    // 年级协调
    Director,       // 教学主任
    SubjectTeacher, // 科任教师
}

impl Department {
    pub const CLASS_TEACHER: &'static str = "class_teacher";
    pub const COORDINATOR: &'static str = "coordinator";
    pub const DIRECTOR: &'static str = "director";
    pub const SUBJECT_TEACHER: &'static str = "subject_teacher";
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Department>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid department: '{s}'. Supported departments: class_teacher, coordinator, director, subject_teacher"
            ))
        })
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Department::ClassTeacher => Department::CLASS_TEACHER,
            Department::Coordinator => Department::COORDINATOR,
            Department::Director => Department::DIRECTOR,
            Department::SubjectTeacher => Department::SUBJECT_TEACHER,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Department::CLASS_TEACHER => Ok(Department::ClassTeacher),
            Department::COORDINATOR => Ok(Department::Coordinator),
            Department::DIRECTOR => Ok(Department::Director),
            Department::SUBJECT_TEACHER => Ok(Department::SubjectTeacher),
            _ => Err(format!("Invalid department: {s}")),
        }
    }
}

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherProfile {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub employee_id: Option<String>,
    pub department: Department,
    // 班主任负责的班级
    pub class_grade: Option<String>,
    pub class_section: Option<String>,
    pub phone: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TeacherProfile {
    /// 班主任负责的班级 (年级, 班)
    pub fn homeroom(&self) -> Option<(&str, &str)> {
        match (&self.class_grade, &self.class_section) {
            (Some(grade), Some(section)) => Some((grade.as_str(), section.as_str())),
            _ => None,
        }
    }
}

// 教师（账号 + 档案）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    pub user: User,
    pub profile: TeacherProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_parse() {
        assert_eq!(
            "class_teacher".parse::<Department>().unwrap(),
            Department::ClassTeacher
        );
        assert_eq!(Department::SubjectTeacher.to_string(), "subject_teacher");
        assert!("principal".parse::<Department>().is_err());
    }

    #[test]
    fn test_department_serde() {
        let json = serde_json::to_string(&Department::Director).unwrap();
        assert_eq!(json, "\"director\"");
        let parsed: Department = serde_json::from_str("\"coordinator\"").unwrap();
        assert_eq!(parsed, Department::Coordinator);
    }
}
