//! # 配置管理模块
//!
//! 提供框架配置，支持构建器模式和配置文件加载

pub mod builders;
pub mod core;

pub use builders::RevConfigBuilder;
pub use core::{DEFAULT_BACKEND, DEFAULT_READ_LIMIT, DEFAULT_VALIDATION_TIMEOUT_MS, RevConfig};
