//! 错误处理模块
//!
//! 定义框架统一的错误类型。错误的显示文本以错误分类名开头
//! （如 `MetadataError: ...`），调用方可以直接按子串判断错误类别。

use crate::odm::ModelOperationResult;
use thiserror::Error;

/// 框架错误类型
#[derive(Error, Debug)]
pub enum RevError {
    /// 参数错误（例如字段名为空）
    #[error("ArgumentError: {message}")]
    ArgumentError { message: String },

    /// 配置错误（元数据格式错误、后端注册错误、配置文件错误）
    #[error("ConfigurationError: {message}")]
    ConfigError { message: String },

    /// 元数据错误（未初始化或无法初始化）
    #[error("MetadataError: {message}")]
    MetadataError { message: String },

    /// 模型错误（不是模型类、名称不一致）
    #[error("ModelError: {message}")]
    ModelError { message: String },

    /// 类型错误（传入的实例不属于该模型）
    #[error("TypeError: {message}")]
    TypeError { message: String },

    /// 模型或后端在注册表中不存在
    #[error("NotFoundError: {message}")]
    NotFound { message: String },

    /// 模型校验失败，携带完整的操作结果
    #[error("ValidationError")]
    ValidationFailed { result: Box<ModelOperationResult> },

    /// 后端在操作结果中添加了错误
    #[error("OperationError: {}", summarize_errors(.result))]
    OperationFailed { result: Box<ModelOperationResult> },

    /// 后端错误
    #[error("BackendError: {message}")]
    BackendError { message: String },

    /// 查询解析错误
    #[error("QueryError: {message}")]
    QueryError { message: String },

    /// 校验超时
    #[error("TimeoutError: {message}")]
    Timeout { message: String },

    /// 序列化错误
    #[error("SerializationError: {message}")]
    SerializationError { message: String },

    /// 用户钩子或方法返回的其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn summarize_errors(result: &ModelOperationResult) -> String {
    result
        .errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl RevError {
    /// 取出错误携带的操作结果（仅 ValidationFailed / OperationFailed）
    pub fn operation_result(&self) -> Option<&ModelOperationResult> {
        match self {
            RevError::ValidationFailed { result } | RevError::OperationFailed { result } => {
                Some(result)
            }
            _ => None,
        }
    }
}

/// 框架结果类型
pub type RevResult<T> = Result<T, RevError>;

/// 快速构造错误的宏
#[macro_export]
macro_rules! rev_error {
    (argument, $msg:expr) => {
        $crate::error::RevError::ArgumentError { message: $msg.to_string() }
    };
    (config, $msg:expr) => {
        $crate::error::RevError::ConfigError { message: $msg.to_string() }
    };
    (metadata, $msg:expr) => {
        $crate::error::RevError::MetadataError { message: $msg.to_string() }
    };
    (model, $msg:expr) => {
        $crate::error::RevError::ModelError { message: $msg.to_string() }
    };
    (type_error, $msg:expr) => {
        $crate::error::RevError::TypeError { message: $msg.to_string() }
    };
    (not_found, $msg:expr) => {
        $crate::error::RevError::NotFound { message: $msg.to_string() }
    };
    (backend, $msg:expr) => {
        $crate::error::RevError::BackendError { message: $msg.to_string() }
    };
    (query, $msg:expr) => {
        $crate::error::RevError::QueryError { message: $msg.to_string() }
    };
    (timeout, $msg:expr) => {
        $crate::error::RevError::Timeout { message: $msg.to_string() }
    };
    (serialization, $msg:expr) => {
        $crate::error::RevError::SerializationError { message: $msg.to_string() }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_category() {
        let err = rev_error!(metadata, "meta not initialised");
        assert_eq!(err.to_string(), "MetadataError: meta not initialised");

        let err = rev_error!(config, "bad backend");
        assert!(err.to_string().starts_with("ConfigurationError"));
    }

    #[test]
    fn test_operation_result_only_on_result_errors() {
        let err = rev_error!(not_found, "Model 'X' does not exist in the registry.");
        assert!(err.operation_result().is_none());
    }
}
