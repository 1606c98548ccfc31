use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use crate::errors::CampusError;
use crate::models::{
    ApiResponse,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

const BAD_CREDENTIALS: &str = "School code, email or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 定位学校（租户）
    let school = storage
        .get_school_by_code(login_request.school_code.trim())
        .await?
        .filter(|school| school.is_active)
        .ok_or_else(|| CampusError::authentication(BAD_CREDENTIALS))?;

    // 2. 同校内按邮箱查找用户
    let email = login_request.email.trim().to_lowercase();
    let user = storage
        .get_user_by_email(school.id, &email)
        .await?
        .ok_or_else(|| CampusError::authentication(BAD_CREDENTIALS))?;

    // 3. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        info!("Failed login attempt for {} at school {}", email, school.code);
        return Err(CampusError::authentication(BAD_CREDENTIALS).into());
    }

    if !user.is_active {
        return Err(CampusError::authentication("Account is inactive").into());
    }

    // 4. 更新最后登录时间（失败不影响登录）
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 5. 签发令牌并写入 Cookie
    let token = user.generate_access_token().map_err(|e| {
        error!("Failed to generate JWT token: {}", e);
        CampusError::authentication("Login failed, unable to generate token")
    })?;

    info!("User {} logged in to school {}", user.id, school.code);

    let response = LoginResponse {
        user,
        school,
        expires_in: config.jwt.token_expiry * 60, // 转换为秒
    };

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_auth_cookie(&token))
        .json(ApiResponse::success(response, "Login successful")))
}
