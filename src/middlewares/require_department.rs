/*!
 * 教师职能访问控制中间件
 *
 * 必须在 RequireJWT 与 `RequireRole::new(&UserRole::Teacher)` 之后使用。
 * 读取当前教师的档案并比对 `department`，通过后把 `TeacherProfile`
 * 放入请求扩展，处理程序用 `RequireDepartment::extract_profile` 取出。
 *
 * 管理员不会被放行：职能接口只面向持有对应档案的教师。
 *
 * ```rust,ignore
 * web::scope("/director")
 *     .wrap(RequireDepartment::new(&Department::Director))
 * ```
 */

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
use tracing::{error, info};

use crate::{
    models::{
        ErrorCode,
        teachers::entities::{Department, TeacherProfile},
        users::entities::User,
    },
    storage::Storage,
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireDepartment {
    required: Department,
}

impl RequireDepartment {
    pub fn new(department: &Department) -> Self {
        Self {
            required: department.clone(),
        }
    }

    /// 从请求扩展中提取教师档案
    pub fn extract_profile(req: &actix_web::HttpRequest) -> Option<TeacherProfile> {
        req.extensions().get::<TeacherProfile>().cloned()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireDepartment
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireDepartmentMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireDepartmentMiddleware {
            service: Rc::new(service),
            required: self.required.clone(),
        }))
    }
}

pub struct RequireDepartmentMiddleware<S> {
    service: Rc<S>,
    required: Department,
}

impl<S, B> Service<ServiceRequest> for RequireDepartmentMiddleware<S>
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
        let required = self.required.clone();

        Box::pin(async move {
            // 1. 校验用户信息
            let Some(user) = req.extensions().get::<User>().cloned() else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            // 2. 查询教师档案
            let Some(storage) = req.app_data::<web::Data<Arc<dyn Storage>>>().cloned() else {
                error!("Storage is not registered in app data");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Internal server error",
                    )
                    .map_into_right_body(),
                ));
            };

            let profile = match storage.get_teacher_profile(user.school_id, user.id).await {
                Ok(profile) => profile,
                Err(err) => {
                    error!("Failed to load teacher profile for {}: {}", user.id, err);
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 3. 比对职能
            match profile {
                Some(profile) if profile.department == required => {
                    req.extensions_mut().insert(profile);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                other => {
                    info!(
                        "Department check failed for user {} (department: {:?}). Required: {:?}",
                        user.id,
                        other.map(|p| p.department),
                        required
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::DepartmentDenied,
                            "Access denied for this department",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
