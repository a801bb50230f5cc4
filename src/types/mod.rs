//! 通用数据类型定义
//!
//! 定义字段值的统一表示以及查询相关的操作符、排序类型

pub mod data_value;
pub mod query;

pub use data_value::{DataValue, json_value_to_data_value};
pub use query::{FieldOperator, LogicalOperator, SortConfig, SortDirection};
