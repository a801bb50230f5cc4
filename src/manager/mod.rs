//! 模型注册表模块
//!
//! 注册表保存模型元数据和命名后端，由调用方显式创建并传给每个操作

mod backend_ops;
mod manager;
mod model_ops;
mod registry;

pub use manager::ModelManager;
pub use registry::ModelRegistry;
