//! 作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    // JSON 对象：题目 ID -> 答案
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    #[sea_orm(column_type = "Double")]
    pub auto_score: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    pub status: String,
    pub is_late: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub submitted_at: i64,
    pub graded_at: Option<i64>,
    pub reviewed_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::assignments::entities::Submission {
        use crate::models::assignments::entities::{Submission, SubmissionStatus};

        let answers = serde_json::from_str(&self.answers).unwrap_or_else(|e| {
            tracing::warn!("Submission {} has malformed answers: {}", self.id, e);
            Default::default()
        });

        Submission {
            id: self.id,
            school_id: self.school_id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            answers,
            auto_score: self.auto_score,
            score: self.score,
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::PendingReview),
            is_late: self.is_late,
            feedback: self.feedback,
            submitted_at: super::to_datetime(self.submitted_at),
            graded_at: self.graded_at.map(super::to_datetime),
            reviewed_by: self.reviewed_by,
        }
    }
}
