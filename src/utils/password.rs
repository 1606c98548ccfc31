use crate::config::AppConfig;
use crate::errors::CampusError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;
use rand::distr::Alphanumeric;

/// 哈希密码
pub fn hash_password(password: &str) -> Result<String, CampusError> {
    let config = AppConfig::get();
    let params = Params::new(
        config.argon2.memory_cost,
        config.argon2.time_cost,
        config.argon2.parallelism,
        None,
    )
    .map_err(|e| CampusError::internal(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CampusError::internal(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 在阻塞线程池中哈希密码，避免占用异步工作线程
pub async fn hash_password_blocking(password: String) -> Result<String, CampusError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CampusError::internal(format!("密码处理失败: {e}")))?
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// 生成临时密码（字母数字，保证同时含大小写字母和数字）
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    loop {
        let candidate: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(length.max(8))
            .map(char::from)
            .collect();
        if candidate.chars().any(|c| c.is_ascii_uppercase())
            && candidate.chars().any(|c| c.is_ascii_lowercase())
            && candidate.chars().any(|c| c.is_ascii_digit())
        {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret123").unwrap();
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
        assert!(!verify_password("Secret123", "not-a-hash"));
    }

    #[test]
    fn test_generated_password_length() {
        assert_eq!(generate_password(12).len(), 12);
        assert_eq!(generate_password(3).len(), 8);
        let password = generate_password(16);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(crate::utils::validate::validate_password(&password).is_valid);
    }
}
