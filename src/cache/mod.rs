//! 对象缓存
//!
//! 值统一以 JSON 字符串存储，`get`/`insert` 负责序列化。

pub mod object_cache;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::debug;

pub use object_cache::moka::MokaCacheWrapper;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化，损坏的条目会被移除
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_raw(key).await {
            CacheResult::Found(json) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Dropping undecodable cache entry {}: {}", key, e);
                    self.remove(key).await;
                    None
                }
            },
            CacheResult::NotFound => None,
        }
    }

    pub async fn insert<T: Serialize + Sync>(&self, key: String, value: &T, ttl: u64) {
        if let Ok(json) = serde_json::to_string(value) {
            self.insert_raw(key, json, ttl).await;
        }
    }
}

/// 用户缓存键
pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache = MokaCacheWrapper::new();
    Ok(Arc::new(cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_typed_round_trip_and_removal() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(16, 60));
        cache.insert(user_cache_key(1), &vec![1, 2, 3], 0).await;
        assert_eq!(cache.get::<Vec<i32>>("user:1").await, Some(vec![1, 2, 3]));

        cache.remove("user:1").await;
        assert_eq!(cache.get::<Vec<i32>>("user:1").await, None);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(16, 60));
        cache.insert_raw("k".into(), "not json".into(), 0).await;
        assert_eq!(cache.get::<Vec<i32>>("k").await, None);
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }
}
