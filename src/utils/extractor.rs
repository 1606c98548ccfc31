//! 路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应，而不是 actix 默认的纯文本 404。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::CampusError;

/// 路径中的 `{id}`，必须是正整数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl SafeIDI64 {
    fn parse(raw: &str) -> Result<Self, CampusError> {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(SafeIDI64(id)),
            _ => Err(CampusError::validation(format!("Invalid id: '{raw}'"))),
        }
    }
}

impl FromRequest for SafeIDI64 {
    type Error = CampusError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("id") {
            Some(raw) => SafeIDI64::parse(raw),
            None => Err(CampusError::validation("Missing id in path")),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(SafeIDI64::parse("42").unwrap(), SafeIDI64(42));
        assert!(SafeIDI64::parse("0").is_err());
        assert!(SafeIDI64::parse("-3").is_err());
        assert!(SafeIDI64::parse("abc").is_err());
    }

    #[actix_web::test]
    async fn test_extract_from_path() {
        let req = actix_web::test::TestRequest::default()
            .param("id", "7")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 7);

        let req = actix_web::test::TestRequest::default()
            .param("id", "x")
            .to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }
}
