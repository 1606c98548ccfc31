//! 课表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timetables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub grade_level: String,
    pub section: String,
    pub day_of_week: i32,
    pub period: i32,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
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
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_slot(self) -> crate::models::timetable::entities::TimetableSlot {
        crate::models::timetable::entities::TimetableSlot {
            id: self.id,
            school_id: self.school_id,
            grade_level: self.grade_level,
            section: self.section,
            day_of_week: self.day_of_week,
            period: self.period,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            start_time: self.start_time,
            end_time: self.end_time,
            room: self.room,
        }
    }
}
