//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`areas`] - 地区接口
//! - [`regions`] - 区域接口
//! - [`patients`] - 患者登记接口
//! - [`tickets`] - 排队号列表接口

pub mod health;

pub mod areas;
pub mod patients;
pub mod regions;
pub mod tickets;

// Re-export common types for handlers
pub use crate::utils::AppResult;
