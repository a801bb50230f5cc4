//! # 操作函数模块
//!
//! 模型数据唯一的读写入口：先校验，再委托给模型所用的后端

mod create;
mod exec;
mod read;
mod remove;
mod update;
mod utils;
mod validate;

pub use create::create;
pub use exec::exec;
pub use read::{read, validate_order_by};
pub use remove::remove;
pub use update::update;
pub use validate::{validate, validate_removal};
