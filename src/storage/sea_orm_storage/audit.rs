use super::{SeaOrmStorage, db_error, page_and_size};
use crate::entity::audit_logs::{ActiveModel, Column, Entity as AuditLogs};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    audit::entities::{AuditLog, AuditLogListQuery, AuditLogListResponse, NewAuditLog},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_audit_log_impl(&self, log: NewAuditLog) -> Result<AuditLog> {
        let details = log
            .details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| CampusError::serialization(format!("序列化审计详情失败: {e}")))?;

        let model = ActiveModel {
            school_id: Set(log.school_id),
            user_id: Set(log.user_id),
            action: Set(log.action),
            entity_type: Set(log.entity_type),
            entity_id: Set(log.entity_id),
            details: Set(details),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("写入审计日志失败"))?;
        Ok(result.into_audit_log())
    }

    pub async fn list_audit_logs_impl(
        &self,
        school_id: i64,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = AuditLogs::find().filter(Column::SchoolId.eq(school_id));
        if let Some(ref action) = query.action {
            select = select.filter(Column::Action.eq(action.as_str()));
        }
        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询审计日志总数失败"))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询审计日志失败"))?;

        Ok(AuditLogListResponse {
            items: rows.into_iter().map(|m| m.into_audit_log()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}
