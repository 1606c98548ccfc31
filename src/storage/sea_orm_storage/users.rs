use super::{SeaOrmStorage, db_error};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::users::{
    entities::User,
    requests::{NewUser, UserUpdate},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取同校用户（邮箱统一按小写存储）
    pub async fn get_user_by_email_impl(&self, school_id: i64, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 创建用户
    pub async fn create_user_impl(&self, user: NewUser) -> Result<User> {
        let result = insert_user(&self.db, user).await?;
        Ok(result.into_user())
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        school_id: i64,
        id: i64,
        update: UserUpdate,
    ) -> Result<Option<User>> {
        if !apply_user_update(&self.db, school_id, id, update).await? {
            return Ok(None);
        }
        self.get_user_by_id_impl(id).await
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("更新最后登录时间失败"))?;

        Ok(result.rows_affected > 0)
    }
}

/// 插入用户行（可在事务中使用）
pub(super) async fn insert_user<C: ConnectionTrait>(
    db: &C,
    user: NewUser,
) -> Result<crate::entity::users::Model> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        school_id: Set(user.school_id),
        email: Set(user.email.trim().to_lowercase()),
        password_hash: Set(user.password_hash),
        role: Set(user.role.to_string()),
        name: Set(user.name.trim().to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model.insert(db).await.map_err(db_error("创建用户失败"))
}

/// 更新用户行，用户不存在或不属于该学校时返回 false
pub(super) async fn apply_user_update<C: ConnectionTrait>(
    db: &C,
    school_id: i64,
    id: i64,
    update: UserUpdate,
) -> Result<bool> {
    let existing = Users::find_by_id(id)
        .filter(Column::SchoolId.eq(school_id))
        .one(db)
        .await
        .map_err(db_error("查询用户失败"))?;
    if existing.is_none() {
        return Ok(false);
    }
    if update.is_empty() {
        return Ok(true);
    }

    let mut model = ActiveModel {
        id: Set(id),
        updated_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    if let Some(email) = update.email {
        model.email = Set(email.trim().to_lowercase());
    }

    if let Some(password_hash) = update.password_hash {
        model.password_hash = Set(password_hash);
    }

    if let Some(name) = update.name {
        model.name = Set(name.trim().to_string());
    }

    if let Some(is_active) = update.is_active {
        model.is_active = Set(is_active);
    }

    model.update(db).await.map_err(db_error("更新用户失败"))?;
    Ok(true)
}
