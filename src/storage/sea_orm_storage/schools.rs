use super::{SeaOrmStorage, db_error};
use crate::entity::schools::{ActiveModel, Column, Entity as Schools};
use crate::errors::Result;
use crate::models::users::entities::School;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 通过代码获取学校（代码不区分大小写，统一按小写存储）
    pub async fn get_school_by_code_impl(&self, code: &str) -> Result<Option<School>> {
        let result = Schools::find()
            .filter(Column::Code.eq(code.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_error("查询学校失败"))?;

        Ok(result.map(|m| m.into_school()))
    }

    pub async fn get_school_by_id_impl(&self, id: i64) -> Result<Option<School>> {
        let result = Schools::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询学校失败"))?;

        Ok(result.map(|m| m.into_school()))
    }

    /// 创建学校
    pub async fn create_school_impl(&self, name: &str, code: &str) -> Result<School> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(name.to_string()),
            code: Set(code.trim().to_lowercase()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建学校失败"))?;

        Ok(result.into_school())
    }
}
