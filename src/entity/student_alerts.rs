//! 学生预警实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_alerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub raised_by: i64,
    pub alert_type: String,
    pub severity: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub is_resolved: bool,
    pub created_at: i64,
    pub resolved_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_alert(self) -> crate::models::alerts::entities::StudentAlert {
        use crate::models::alerts::entities::{AlertSeverity, AlertType, StudentAlert};

        StudentAlert {
            id: self.id,
            school_id: self.school_id,
            student_id: self.student_id,
            raised_by: self.raised_by,
            alert_type: self.alert_type.parse::<AlertType>().unwrap_or(AlertType::Other),
            severity: self
                .severity
                .parse::<AlertSeverity>()
                .unwrap_or(AlertSeverity::Medium),
            message: self.message,
            is_resolved: self.is_resolved,
            created_at: super::to_datetime(self.created_at),
            resolved_at: self.resolved_at.map(super::to_datetime),
        }
    }
}
