//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub school_id: i64,
    pub employee_id: Option<String>,
    pub department: String,
    pub class_grade: Option<String>,
    pub class_section: Option<String>,
    pub phone: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::teachers::entities::TeacherProfile {
        use crate::models::teachers::entities::{Department, TeacherProfile};

        TeacherProfile {
            id: self.id,
            user_id: self.user_id,
            school_id: self.school_id,
            employee_id: self.employee_id,
            department: self
                .department
                .parse::<Department>()
                .unwrap_or(Department::SubjectTeacher),
            class_grade: self.class_grade,
            class_section: self.class_section,
            phone: self.phone,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
