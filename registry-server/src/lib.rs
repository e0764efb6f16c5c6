//! Registry Server - 患者登记与排队号分配服务
//!
//! # 架构概述
//!
//! 本模块是 Registry Server 的主入口，提供以下核心功能：
//!
//! - **排队号分配** (`ticketing`): 按地区前缀的顺序排队号，基于原子计数器
//! - **地区目录** (`locations`): 幂等加载地区与区域目录
//! - **数据库** (`db`): 嵌入式 SQLite 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! registry-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装与中间件
//! ├── ticketing/     # 排队号分配与患者登记
//! ├── locations/     # 地区目录加载
//! ├── utils/         # 工具函数
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod locations;
pub mod routes;
pub mod ticketing;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), None);

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____             _      __
   / __ \___  ____ _(_)____/ /________  __
  / /_/ / _ \/ __ `/ / ___/ __/ ___/ / / /
 / _, _/  __/ /_/ / (__  ) /_/ /  / /_/ /
/_/ |_|\___/\__, /_/____/\__/_/   \__, /
           /____/                /____/
    "#
    );
}
