//! # 模型操作层模块
//!
//! 操作描述、选项、结果类型，以及 validate / create / read / update / remove / exec 操作函数

pub mod operations;
pub mod traits;
pub mod types;

pub use operations::*;
pub use traits::ModelOperations;
pub use types::{
    CreateOptions, ExecArgs, ExecOptions, ModelOperation, ModelOperationResult, OperationError,
    OperationMeta, ReadOptions, RemoveOptions, UpdateOptions, ValidationOptions,
    DEFAULT_CREATE_OPTIONS, DEFAULT_EXEC_OPTIONS, DEFAULT_READ_OPTIONS, DEFAULT_REMOVE_OPTIONS,
    DEFAULT_UPDATE_OPTIONS,
};
