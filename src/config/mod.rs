//! 配置管理
//!
//! 静态配置来自 `config.toml` / `config.{APP_ENV}.toml` / 环境变量，启动时加载一次。

mod loader;
mod structs;

pub use structs::*;
