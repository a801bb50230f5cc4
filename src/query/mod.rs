//! 查询模块
//!
//! where 子句解析与内存求值

pub mod nodes;
pub mod parser;

pub use nodes::{like_to_regex, QueryNode};
pub use parser::QueryParser;
