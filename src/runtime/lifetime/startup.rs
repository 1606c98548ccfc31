use crate::cache::{ObjectCache, create_object_cache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::{School, UserRole};
use crate::models::users::requests::NewUser;
use crate::storage::Storage;
use crate::utils::password::{generate_password, hash_password_blocking};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 确保默认学校存在
async fn seed_school(storage: &Arc<dyn Storage>) -> Result<School> {
    let seed = &AppConfig::get().seed;
    if let Some(school) = storage.get_school_by_code(&seed.school_code).await? {
        debug!("Default school '{}' already exists", school.code);
        return Ok(school);
    }

    let school = storage.create_school(&seed.school_name, &seed.school_code).await?;
    info!(
        "Default school created (ID: {}, code: {})",
        school.id, school.code
    );
    Ok(school)
}

/// 初始化默认管理员账号
/// 如果默认学校中还没有该邮箱的账号，则创建一个 admin 账号
async fn seed_admin(storage: &Arc<dyn Storage>, school: &School) -> Result<()> {
    let seed = &AppConfig::get().seed;
    let email = seed.admin_email.trim().to_lowercase();

    if storage.get_user_by_email(school.id, &email).await?.is_some() {
        debug!("Admin account {} already exists, skipping admin seed", email);
        return Ok(());
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = hash_password_blocking(password).await?;
    let user = storage
        .create_user(NewUser {
            school_id: school.id,
            email,
            password_hash,
            role: UserRole::Admin,
            name: "Administrator".to_string(),
        })
        .await?;

    info!(
        "Default admin account created successfully (ID: {}, email: {}, school: {})",
        user.id, user.email, school.code
    );
    Ok(())
}

/// 准备服务器启动的上下文
/// 包括存储、种子数据和缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 种子数据失败不阻止启动
    match seed_school(&storage).await {
        Ok(school) => {
            if let Err(e) = seed_admin(&storage, &school).await {
                warn!("Failed to seed admin account: {}", e);
            }
        }
        Err(e) => warn!("Failed to seed default school: {}", e),
    }

    let cache = create_object_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
