use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::{ObjectCache, user_cache_key};
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 注销：清除 Cookie；令牌仍有效时顺带移除该用户的缓存
pub async fn handle_logout(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = JwtUtils::extract_token(request)
        .and_then(|token| JwtUtils::verify_token(&token).ok())
        .and_then(|claims| claims.user_id());

    if let Some(user_id) = user_id
        && let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>()
    {
        cache.remove(&user_cache_key(user_id)).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_auth_cookie())
        .json(ApiResponse::success_empty("Logged out")))
}
