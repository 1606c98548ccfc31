pub mod admin;
pub mod auth;
pub mod students;
pub mod teachers;

pub use admin::AdminService;
pub use auth::AuthService;
pub use students::StudentService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;
use tracing::{error, warn};

use crate::cache::{ObjectCache, user_cache_key};
use crate::errors::{CampusError, Result};
use crate::middlewares::{RequireDepartment, RequireJWT};
use crate::models::announcements::entities::{Announcement, Audience};
use crate::models::audit::entities::NewAuditLog;
use crate::models::calendar::{
    entities::CalendarEvent,
    requests::{EventListParams, EventListQuery},
};
use crate::models::teachers::entities::TeacherProfile;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate::{trim_optional, validate_date};

/// 从 app data 取存储实例
pub(crate) fn storage_from(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            CampusError::database_config("Storage not found in app data")
        })
}

/// 当前登录用户（由 RequireJWT 注入）
pub(crate) fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user(request)
        .ok_or_else(|| CampusError::authentication("Authentication required"))
}

/// 当前教师档案（由 RequireDepartment 注入，未经过该中间件时查库）
pub(crate) async fn current_teacher_profile(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    user: &User,
) -> Result<TeacherProfile> {
    if let Some(profile) = RequireDepartment::extract_profile(request) {
        return Ok(profile);
    }
    storage
        .get_teacher_profile(user.school_id, user.id)
        .await?
        .ok_or_else(|| CampusError::authorization("Teacher profile not found"))
}

/// 写审计日志，失败只记录警告
pub(crate) async fn record_audit(storage: &Arc<dyn Storage>, log: NewAuditLog) {
    let action = log.action.clone();
    if let Err(e) = storage.create_audit_log(log).await {
        warn!("Failed to write audit log for {}: {}", action, e);
    }
}

/// 用户资料变更后移除认证缓存
pub(crate) async fn invalidate_user_cache(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&user_cache_key(user_id)).await;
    }
}

/// 今天的日期（YYYY-MM-DD，UTC）
pub(crate) fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// 校历查询：默认从今天开始
pub(crate) async fn list_events_for(
    storage: &Arc<dyn Storage>,
    school_id: i64,
    params: EventListParams,
) -> Result<Vec<CalendarEvent>> {
    let from = trim_optional(params.from).unwrap_or_else(today);
    validate_date(&from).map_err(invalid)?;
    let to = trim_optional(params.to);
    if let Some(ref to) = to {
        validate_date(to).map_err(invalid)?;
    }

    storage
        .list_events(
            school_id,
            EventListQuery {
                from: Some(from),
                to,
                event_type: params.event_type,
                limit: None,
            },
        )
        .await
}

/// 按角色可见范围列出公告
pub(crate) async fn list_announcements_for(
    storage: &Arc<dyn Storage>,
    user: &User,
    limit: Option<u64>,
) -> Result<Vec<Announcement>> {
    storage
        .list_announcements(user.school_id, Audience::visible_to(&user.role), limit)
        .await
}

/// 把 `&'static str` 校验错误转成 400
pub(crate) fn invalid(message: &str) -> CampusError {
    CampusError::validation(message)
}
