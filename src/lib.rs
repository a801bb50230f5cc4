//! rev_models - 声明式数据建模框架
//!
//! 通过字段声明定义模型，在写入前完成字段与模型级校验，
//! 并通过可插拔的命名后端完成 create / read / update / remove / exec 操作。
//! 内置一个基于内存的后端，支持 where 子句过滤、排序、分页和自增编号。

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod adapter;
pub mod config;
pub mod error;
pub mod i18n;
pub mod manager;
pub mod model;
pub mod odm;
pub mod query;
pub mod types;

pub use adapter::{Backend, InMemoryBackend};
pub use config::{RevConfig, RevConfigBuilder};
pub use error::{RevError, RevResult};
pub use manager::{ModelManager, ModelRegistry};
pub use model::*;
pub use odm::{
    create, exec, read, remove, update, validate, validate_removal, CreateOptions, ExecArgs,
    ExecOptions, ModelOperation, ModelOperationResult, ModelOperations, OperationError,
    OperationMeta, ReadOptions, RemoveOptions, UpdateOptions, ValidationOptions,
};
pub use query::{QueryNode, QueryParser};
pub use types::{DataValue, FieldOperator, LogicalOperator, SortConfig, SortDirection};

use rat_logger::info;

/// 初始化 rev_models
///
/// 注册校验消息翻译并按环境变量选择语言。
/// 日志系统由调用者自行初始化。
pub fn init() {
    i18n::ValidationMessageI18n::init(None);
    info!("{} 初始化完成, 语言={}", get_info(), i18n::current_language());
}

/// 按配置初始化，配置中的 language 优先于环境变量
pub fn init_with_config(config: &RevConfig) {
    i18n::ValidationMessageI18n::init(config.language.as_deref());
    info!("{} 初始化完成, 语言={}", get_info(), i18n::current_language());
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
