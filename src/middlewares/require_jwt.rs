/*!
 * JWT 认证中间件
 *
 * 验证 `auth_token`，确保只有经过身份验证的用户才能访问受保护的路由。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/protected")
 *         .wrap(RequireJWT)
 *         .route("/me", web::get().to(handler)),
 * )
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user(&req)` 取得当前用户。
 *
 * ## 认证流程
 *
 * 1. 从 `auth_token` Cookie 读取令牌，缺失时回退到 `Authorization: Bearer <token>`
 * 2. 校验签名与过期时间
 * 3. 按用户 ID 从缓存读取用户，未命中则查库并写入缓存
 * 4. 用户不存在、已停用或学校不一致时返回 401
 */

use crate::cache::{ObjectCache, user_cache_key};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

// 提取并验证令牌，返回当前用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, &'static str> {
    let token = JwtUtils::extract_token(req.request()).ok_or("Missing authentication token")?;

    let claims = JwtUtils::verify_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid or expired token"
    })?;

    let user_id = claims.user_id().ok_or("Invalid user ID in token")?;

    let (Some(storage), Some(cache)) = (
        req.app_data::<web::Data<Arc<dyn Storage>>>(),
        req.app_data::<web::Data<Arc<dyn ObjectCache>>>(),
    ) else {
        error!("Storage or cache is not registered in app data");
        return Err("Authentication unavailable");
    };

    let cache_key = user_cache_key(user_id);
    let user = match cache.get::<User>(&cache_key).await {
        Some(user) => user,
        None => {
            let user = storage
                .get_user_by_id(user_id)
                .await
                .map_err(|err| {
                    error!("Failed to load user {}: {}", user_id, err);
                    "Failed to retrieve user"
                })?
                .ok_or("User not found")?;
            cache
                .insert(cache_key, &user, AppConfig::get().cache.default_ttl)
                .await;
            user
        }
    };

    if user.school_id != claims.school_id {
        return Err("Token does not match user school");
    }
    if !user.is_active {
        return Err("User is not active");
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行给 CORS 处理
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }
}
