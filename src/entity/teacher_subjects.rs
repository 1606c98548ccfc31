//! 教师任课关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub grade_level: String,
    pub section: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_subject(self) -> crate::models::subjects::entities::TeacherSubject {
        crate::models::subjects::entities::TeacherSubject {
            id: self.id,
            school_id: self.school_id,
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            grade_level: self.grade_level,
            section: self.section,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
