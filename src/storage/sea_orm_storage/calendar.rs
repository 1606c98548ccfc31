use super::{SeaOrmStorage, db_error};
use crate::entity::calendar_events::{ActiveModel, Column, Entity as CalendarEvents};
use crate::errors::Result;
use crate::models::calendar::{
    entities::CalendarEvent,
    requests::{EventListQuery, NewEvent, UpdateEventRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_event_impl(&self, req: NewEvent) -> Result<CalendarEvent> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(req.school_id),
            title: Set(req.title),
            description: Set(req.description),
            event_type: Set(req.event_type.to_string()),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建校历事件失败"))?;
        Ok(result.into_event())
    }

    pub async fn get_event_impl(&self, school_id: i64, id: i64) -> Result<Option<CalendarEvent>> {
        let result = CalendarEvents::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询校历事件失败"))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 列出校历事件，`from` 按结束日期（无结束日期时按开始日期）筛选
    pub async fn list_events_impl(
        &self,
        school_id: i64,
        query: EventListQuery,
    ) -> Result<Vec<CalendarEvent>> {
        let mut select = CalendarEvents::find().filter(Column::SchoolId.eq(school_id));

        if let Some(ref from) = query.from {
            select = select.filter(
                sea_orm::Condition::any()
                    .add(Column::EndDate.gte(from.as_str()))
                    .add(
                        sea_orm::Condition::all()
                            .add(Column::EndDate.is_null())
                            .add(Column::StartDate.gte(from.as_str())),
                    ),
            );
        }
        if let Some(ref to) = query.to {
            select = select.filter(Column::StartDate.lte(to.as_str()));
        }
        if let Some(event_type) = query.event_type {
            select = select.filter(Column::EventType.eq(event_type.to_string()));
        }
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let rows = select
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询校历事件失败"))?;

        Ok(rows.into_iter().map(|m| m.into_event()).collect())
    }

    pub async fn update_event_impl(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<CalendarEvent>> {
        let Some(existing) = CalendarEvents::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询校历事件失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(event_type) = update.event_type {
            model.event_type = Set(event_type.to_string());
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("更新校历事件失败"))?;
        Ok(Some(result.into_event()))
    }

    pub async fn delete_event_impl(&self, school_id: i64, id: i64) -> Result<bool> {
        let result = CalendarEvents::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::SchoolId.eq(school_id))
            .exec(&self.db)
            .await
            .map_err(db_error("删除校历事件失败"))?;

        Ok(result.rows_affected > 0)
    }
}
