//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub grade_level: String,
    pub section: Option<String>,
    pub due_date: Option<i64>,
    #[sea_orm(column_type = "Double")]
    pub total_marks: f64,
    // JSON 数组
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(has_many = "super::assignment_submissions::Entity")]
    Submissions,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::assignment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::Assignment;

        let questions = serde_json::from_str(&self.questions).unwrap_or_else(|e| {
            tracing::warn!("Assignment {} has malformed questions: {}", self.id, e);
            Vec::new()
        });

        Assignment {
            id: self.id,
            school_id: self.school_id,
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            title: self.title,
            description: self.description,
            grade_level: self.grade_level,
            section: self.section,
            due_date: self.due_date.map(super::to_datetime),
            total_marks: self.total_marks,
            questions,
            is_active: self.is_active,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
