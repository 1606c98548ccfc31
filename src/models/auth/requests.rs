use serde::Deserialize;
use ts_rs::TS;

// 用户登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginRequest {
    /// 学校代码（租户标识）
    pub school_code: String,
    pub email: String,
    pub password: String,
}
