//! 校历事件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "calendar_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub event_type: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_event(self) -> crate::models::calendar::entities::CalendarEvent {
        use crate::models::calendar::entities::{CalendarEvent, EventType};

        CalendarEvent {
            id: self.id,
            school_id: self.school_id,
            title: self.title,
            description: self.description,
            event_type: self.event_type.parse::<EventType>().unwrap_or(EventType::Other),
            start_date: self.start_date,
            end_date: self.end_date,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
