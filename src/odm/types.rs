//! # 操作类型定义
//!
//! 操作描述、各操作的选项以及操作结果

use crate::error::{RevError, RevResult};
use crate::model::{Model, ModelValidationResult};
use crate::types::DataValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// exec 调用参数
pub type ExecArgs = BTreeMap<String, DataValue>;

/// 操作描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOperation {
    /// 操作名（create / read / update / remove / exec）
    pub operation: String,
    /// 操作使用的 where 子句
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<JsonValue>,
}

impl ModelOperation {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            where_clause: None,
        }
    }

    pub fn with_where(mut self, where_clause: JsonValue) -> Self {
        self.where_clause = Some(where_clause);
        self
    }
}

/// 校验选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// 超时（毫秒），未设置时使用注册表配置
    pub timeout_ms: Option<u64>,
}

impl ValidationOptions {
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms: Some(timeout_ms),
        }
    }
}

/// create 选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOptions {
    pub validation: Option<ValidationOptions>,
}

/// read 选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// 形如 `"name"`、`"age desc"` 的排序条目
    pub order_by: Option<Vec<String>>,
}

impl ReadOptions {
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order_by(mut self, entries: &[&str]) -> Self {
        self.order_by = Some(entries.iter().map(|e| e.to_string()).collect());
        self
    }
}

/// update 选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOptions {
    /// 显式 where 子句；未设置时由主键推导
    #[serde(rename = "where")]
    pub where_clause: Option<JsonValue>,
    /// 只写入这些字段；未设置时写入全部字段
    pub fields: Option<Vec<String>>,
    pub validation: Option<ValidationOptions>,
}

impl UpdateOptions {
    pub fn with_where(mut self, where_clause: JsonValue) -> Self {
        self.where_clause = Some(where_clause);
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}

/// remove 选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoveOptions {
    #[serde(rename = "where")]
    pub where_clause: Option<JsonValue>,
    pub validation: Option<ValidationOptions>,
}

impl RemoveOptions {
    pub fn with_where(mut self, where_clause: JsonValue) -> Self {
        self.where_clause = Some(where_clause);
        self
    }
}

/// exec 选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecOptions {
    /// 调用前是否先校验模型
    pub validate: bool,
    pub validation: Option<ValidationOptions>,
}

impl Default for ExecOptions {
    fn default() -> Self {
        DEFAULT_EXEC_OPTIONS
    }
}

pub const DEFAULT_CREATE_OPTIONS: CreateOptions = CreateOptions { validation: None };

pub const DEFAULT_READ_OPTIONS: ReadOptions = ReadOptions {
    limit: Some(crate::config::DEFAULT_READ_LIMIT),
    offset: Some(0),
    order_by: None,
};

pub const DEFAULT_UPDATE_OPTIONS: UpdateOptions = UpdateOptions {
    where_clause: None,
    fields: None,
    validation: None,
};

pub const DEFAULT_REMOVE_OPTIONS: RemoveOptions = RemoveOptions {
    where_clause: None,
    validation: None,
};

pub const DEFAULT_EXEC_OPTIONS: ExecOptions = ExecOptions {
    validate: true,
    validation: None,
};

/// 后端或操作添加的错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, JsonValue>,
}

/// 操作元信息（分页、计数、排序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<String>>,
}

/// 操作结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOperationResult {
    pub operation: ModelOperation,
    pub success: bool,
    /// 单条结果（create / update）
    pub result: Option<Model>,
    /// 多条结果（read）
    pub results: Option<Vec<Model>>,
    /// exec 返回的数据
    pub data: Option<DataValue>,
    pub validation: Option<ModelValidationResult>,
    pub errors: Vec<OperationError>,
    pub meta: OperationMeta,
}

impl ModelOperationResult {
    pub fn new(operation: ModelOperation) -> Self {
        Self {
            operation,
            success: true,
            result: None,
            results: None,
            data: None,
            validation: None,
            errors: Vec::new(),
            meta: OperationMeta::default(),
        }
    }

    /// 添加错误并把结果标记为失败
    pub fn add_error(
        &mut self,
        message: impl Into<String>,
        code: Option<&str>,
        data: Option<JsonValue>,
    ) -> RevResult<()> {
        let message = message.into();
        if message.is_empty() {
            return Err(crate::rev_error!(
                argument,
                "You must specify a message for an operation error."
            ));
        }
        let data = match data {
            None => Map::new(),
            Some(JsonValue::Object(map)) => map,
            Some(_) => {
                return Err(crate::rev_error!(
                    argument,
                    "You cannot add non-object data to an operation result"
                ));
            }
        };
        self.success = false;
        self.errors.push(OperationError {
            message,
            code: code.map(str::to_string),
            data,
        });
        Ok(())
    }

    /// 合并元信息，只覆盖已设置的项
    pub fn set_meta(&mut self, meta: OperationMeta) {
        if meta.offset.is_some() {
            self.meta.offset = meta.offset;
        }
        if meta.limit.is_some() {
            self.meta.limit = meta.limit;
        }
        if meta.total_count.is_some() {
            self.meta.total_count = meta.total_count;
        }
        if meta.order_by.is_some() {
            self.meta.order_by = meta.order_by;
        }
    }

    /// 以校验结果标记失败，返回携带本结果的 ValidationFailed 错误
    pub fn create_validation_error(mut self, validation: ModelValidationResult) -> RevError {
        self.success = false;
        self.validation = Some(validation);
        self.errors.push(OperationError {
            message: "ValidationError".to_string(),
            code: Some("validation_error".to_string()),
            data: Map::new(),
        });
        RevError::ValidationFailed {
            result: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_error_marks_failure() {
        let mut result = ModelOperationResult::new(ModelOperation::new("create"));
        assert!(result.success);
        result
            .add_error("storage full", Some("full"), Some(json!({"limit": 10})))
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.errors[0].data.get("limit"), Some(&json!(10)));
        assert!(result.add_error("x", None, Some(json!([1]))).is_err());
    }

    #[test]
    fn test_set_meta_merges() {
        let mut result = ModelOperationResult::new(ModelOperation::new("read"));
        result.set_meta(OperationMeta {
            offset: Some(0),
            limit: Some(20),
            ..Default::default()
        });
        result.set_meta(OperationMeta {
            total_count: Some(3),
            ..Default::default()
        });
        assert_eq!(result.meta.limit, Some(20));
        assert_eq!(result.meta.total_count, Some(3));
    }

    #[test]
    fn test_create_validation_error_carries_result() {
        let result = ModelOperationResult::new(ModelOperation::new("create"));
        let mut validation = ModelValidationResult::new();
        validation.add_field_error("name", "Name is required", Some("required"), None).unwrap();
        let err = result.create_validation_error(validation);
        assert_eq!(err.to_string(), "ValidationError");
        let carried = err.operation_result().unwrap();
        assert!(!carried.success);
        assert!(!carried.validation.as_ref().unwrap().valid);
    }

    #[test]
    fn test_exec_options_default_to_validate() {
        assert!(ExecOptions::default().validate);
        assert_eq!(DEFAULT_READ_OPTIONS.limit, Some(20));
    }
}
