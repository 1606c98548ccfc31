/*!
 * 区域角色守卫
 *
 * 管理员、教师、学生三个区域各自挂一个守卫，必须放在 RequireJWT 内层：
 *
 * ```rust,ignore
 * web::scope("/api/protected")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::scope("/admin")
 *             .wrap(RequireRole::new(&UserRole::Admin))
 *             .route("/dashboard", web::get().to(dashboard)),
 *     )
 * ```
 *
 * 角色不符返回 403，请求中没有当前用户（守卫放错位置）返回 401。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, warn};

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 只允许一种角色进入
    pub fn new(role: &UserRole) -> Self {
        Self::new_any(&[role])
    }

    /// 允许列表中的任一角色进入
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| (*r).clone()).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

/// 检查结果：放行，或拒绝时的状态码、错误码和提示
fn check_role(
    user: Option<&User>,
    allowed: &[UserRole],
) -> Result<(), (StatusCode, ErrorCode, &'static str)> {
    match user {
        Some(user) if allowed.contains(&user.role) => Ok(()),
        Some(user) => {
            warn!(
                "User {} of school {} with role {} tried to enter an area for {:?}",
                user.id, user.school_id, user.role, allowed
            );
            Err((
                StatusCode::FORBIDDEN,
                ErrorCode::RoleDenied,
                "Access denied for this role",
            ))
        }
        None => {
            debug!("Role guard reached without an authenticated user");
            Err((
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Authentication required",
            ))
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let verdict = check_role(req.extensions().get::<User>(), &self.allowed);

        Box::pin(async move {
            match verdict {
                Ok(()) => Ok(srv.call(req).await?.map_into_left_body()),
                Err((status, code, message)) => Ok(req.into_response(
                    create_error_response(status, code, message).map_into_right_body(),
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> User {
        User {
            id: 7,
            school_id: 1,
            email: "someone@school.edu".to_string(),
            password_hash: String::new(),
            role,
            name: "Someone".to_string(),
            is_active: true,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_matching_role_passes() {
        let teacher = user(UserRole::Teacher);
        assert!(check_role(Some(&teacher), &[UserRole::Teacher]).is_ok());
        assert!(check_role(Some(&teacher), &[UserRole::Admin, UserRole::Teacher]).is_ok());
    }

    #[test]
    fn test_other_role_is_forbidden() {
        let student = user(UserRole::Student);
        let (status, code, _) = check_role(Some(&student), &[UserRole::Admin]).unwrap_err();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code as i32, ErrorCode::RoleDenied as i32);
    }

    #[test]
    fn test_missing_user_is_unauthorized() {
        let (status, _, _) = check_role(None, &[UserRole::Admin]).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
