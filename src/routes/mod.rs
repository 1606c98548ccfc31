pub mod admin;
pub mod auth;
pub mod students;
pub mod teachers;

use actix_web::web;

use crate::middlewares;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use students::configure_student_routes;
pub use teachers::configure_teacher_routes;

// 需要登录的区域：先校验 JWT，再按用户限流，最后由各子区域校验角色
pub fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/protected")
            .wrap(middlewares::RateLimit::api())
            .wrap(middlewares::RequireJWT)
            .configure(configure_admin_routes)
            .configure(configure_teacher_routes)
            .configure(configure_student_routes),
    );
}
