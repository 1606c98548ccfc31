use super::{SeaOrmStorage, db_error};
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::errors::Result;
use crate::models::announcements::{
    entities::{Announcement, Audience},
    requests::NewAnnouncement,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_announcement_impl(&self, req: NewAnnouncement) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(req.school_id),
            title: Set(req.title),
            content: Set(req.content),
            audience: Set(req.audience.to_string()),
            created_by: Set(req.created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建公告失败"))?;
        Ok(result.into_announcement())
    }

    /// 列出有效公告（最新在前）
    pub async fn list_announcements_impl(
        &self,
        school_id: i64,
        audiences: &[Audience],
        limit: Option<u64>,
    ) -> Result<Vec<Announcement>> {
        let mut select = Announcements::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::Audience.is_in(audiences.iter().map(|a| a.to_string())));

        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询公告失败"))?;

        Ok(rows.into_iter().map(|m| m.into_announcement()).collect())
    }

    /// 停用公告
    pub async fn deactivate_announcement_impl(&self, school_id: i64, id: i64) -> Result<bool> {
        let result = Announcements::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_error("停用公告失败"))?;

        Ok(result.rows_affected > 0)
    }
}
