//! 宽松的查询参数反序列化
//!
//! `#[serde(flatten)]` 会让 urlencoded 的值全部以字符串形式到达，
//! 这里同时接受原生类型和字符串形式。

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum I64OrString {
    Int(i64),
    Str(String),
}

pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("invalid boolean: {other}"))),
        },
    }
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<I64OrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(I64OrString::Int(i)) => Ok(Some(i)),
        Some(I64OrString::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(I64OrString::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "opt_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "opt_i64")]
        id: Option<i64>,
    }

    #[test]
    fn test_accepts_strings_and_natives() {
        let p: Params = serde_json::from_str(r#"{"flag":"true","id":"42"}"#).unwrap();
        assert_eq!(p.flag, Some(true));
        assert_eq!(p.id, Some(42));

        let p: Params = serde_json::from_str(r#"{"flag":false,"id":7}"#).unwrap();
        assert_eq!(p.flag, Some(false));
        assert_eq!(p.id, Some(7));

        let p: Params = serde_json::from_str("{}").unwrap();
        assert_eq!(p.flag, None);
        assert_eq!(p.id, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Params>(r#"{"id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Params>(r#"{"flag":"maybe"}"#).is_err());
    }
}
