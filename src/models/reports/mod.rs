//! 各角色的看板与汇总视图
pub mod responses;
