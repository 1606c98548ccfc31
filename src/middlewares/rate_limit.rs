/*!
 * 固定窗口限流
 *
 * 登录接口按客户端 IP 计数，受保护接口在 RequireJWT 之后按 "学校 + 用户" 计数，
 * 同一窗口内超过上限返回 429 并带上 `Retry-After`。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login));
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 计数表，键为 `范围:主体:窗口序号`
static COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

const REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    scope: Rc<str>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64, scope: &str) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.max(1),
            scope: Rc::from(scope),
        }
    }

    /// 登录尝试
    pub fn login() -> Self {
        Self::new(AppConfig::get().server.limits.login_per_minute, 60, "login")
    }

    /// 受保护接口
    pub fn api() -> Self {
        Self::new(AppConfig::get().server.limits.api_per_minute, 60, "api")
    }

    fn counter_key(&self, subject: &str, now: i64) -> String {
        let window = now.max(0) as u64 / self.window_secs;
        format!("{}:{}:{}", self.scope, subject, window)
    }
}

/// 已登录用户按学校和用户计数，否则按 IP
fn subject(req: &ServiceRequest) -> String {
    if let Some(user) = req.extensions().get::<User>() {
        return format!("s{}:u{}", user.school_id, user.id);
    }
    format!("ip:{}", client_ip(req))
}

/// 客户端 IP：连接信息优先，其次是 X-Forwarded-For 第一段和 X-Real-IP
///
/// 直接暴露在不可信网络时转发头可被伪造，部署时应由反向代理覆盖这些头。
fn client_ip(req: &ServiceRequest) -> String {
    let from_connection = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    let header_ip = |name: &str| -> Option<String> {
        let value = req.headers().get(name)?.to_str().ok()?;
        let first = value.split(',').next()?.trim();
        first.parse::<IpAddr>().ok().map(|ip| ip.to_string())
    };

    from_connection
        .clone()
        .filter(|ip| ip.parse::<IpAddr>().is_ok())
        .or_else(|| header_ip("X-Forwarded-For"))
        .or_else(|| header_ip("X-Real-IP"))
        .or(from_connection)
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header((REMAINING_HEADER, "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let max_requests = self.limit.max_requests;
        let window_secs = self.limit.window_secs;
        let key = self
            .limit
            .counter_key(&subject(&req), chrono::Utc::now().timestamp());

        Box::pin(async move {
            let count = COUNTERS
                .entry(key.clone())
                .and_upsert_with(|current| {
                    let next = current.map_or(0, |entry| entry.into_value()).saturating_add(1);
                    ready(next)
                })
                .await
                .into_value();

            if count > max_requests {
                warn!("Rate limit exceeded for {} ({}/{})", key, count, max_requests);
                return Ok(req.into_response(too_many_requests(window_secs).map_into_right_body()));
            }

            let mut res = srv.call(req).await?;
            res.headers_mut().insert(
                HeaderName::from_static(REMAINING_HEADER),
                HeaderValue::from(max_requests - count),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    #[::core::prelude::v1::test]
    fn test_counter_key_changes_with_window() {
        let limit = RateLimit::new(5, 60, "login");
        assert_eq!(limit.counter_key("ip:10.0.0.1", 119), "login:ip:10.0.0.1:1");
        assert_eq!(limit.counter_key("ip:10.0.0.1", 120), "login:ip:10.0.0.1:2");
    }

    #[::core::prelude::v1::test]
    fn test_presets_follow_config_defaults() {
        assert_eq!(RateLimit::login().max_requests, 5);
        assert_eq!(RateLimit::api().max_requests, 100);
        assert_eq!(&*RateLimit::api().scope, "api");
    }

    #[actix_web::test]
    async fn test_sixth_attempt_in_window_is_rejected() {
        let app = test::init_service(
            App::new().service(
                web::scope("/limited")
                    .wrap(RateLimit::new(5, 3600, "test_sixth_attempt"))
                    .route("", web::post().to(HttpResponse::Ok)),
            ),
        )
        .await;

        for expected_remaining in (0..5).rev() {
            let req = test::TestRequest::post()
                .uri("/limited")
                .peer_addr("10.1.2.3:4000".parse().unwrap())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                resp.headers().get(REMAINING_HEADER).unwrap(),
                &expected_remaining.to_string()
            );
        }

        let req = test::TestRequest::post()
            .uri("/limited")
            .peer_addr("10.1.2.3:4000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("retry-after"));

        // 其他客户端不受影响
        let req = test::TestRequest::post()
            .uri("/limited")
            .peer_addr("10.9.9.9:4000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
