use super::entities::UserRole;

// 创建用户（存储层输入，密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub school_id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub name: String,
}

// 用户更新（存储层输入）
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.name.is_none()
            && self.is_active.is_none()
    }
}
