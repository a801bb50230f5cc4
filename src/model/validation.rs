//! 校验结果累加器
//!
//! 一次校验过程对应一个 `ModelValidationResult`，所有校验器共享同一个结果并向其中追加错误。
//! `valid` 一旦变为 false 就不会再变回 true。

use crate::error::RevResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// 字段级错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// 附加数据，序列化时与 message/code 平铺在同一层
    #[serde(flatten)]
    pub data: Map<String, JsonValue>,
}

/// 模型级错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, JsonValue>,
}

/// 模型校验结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelValidationResult {
    /// 是否通过校验
    pub valid: bool,
    /// 字段名 -> 该字段的错误列表（按添加顺序）
    pub field_errors: BTreeMap<String, Vec<FieldError>>,
    /// 模型级错误列表
    pub model_errors: Vec<ModelError>,
}

impl Default for ModelValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

fn check_data(data: Option<JsonValue>, context: &str) -> RevResult<Map<String, JsonValue>> {
    match data {
        None => Ok(Map::new()),
        Some(JsonValue::Object(map)) => Ok(map),
        Some(_) => Err(crate::rev_error!(
            argument,
            format!("You cannot add non-object data to a {}", context)
        )),
    }
}

impl ModelValidationResult {
    /// 创建初始为有效的结果
    pub fn new() -> Self {
        Self::with_valid(true)
    }

    /// 以指定的初始有效性创建结果
    pub fn with_valid(valid: bool) -> Self {
        Self {
            valid,
            field_errors: BTreeMap::new(),
            model_errors: Vec::new(),
        }
    }

    /// 添加字段错误
    ///
    /// `field_name` 不能为空；`data` 必须是 JSON 对象，其键会与 message/code 合并。
    pub fn add_field_error(
        &mut self,
        field_name: &str,
        message: impl Into<String>,
        code: Option<&str>,
        data: Option<JsonValue>,
    ) -> RevResult<()> {
        if field_name.is_empty() {
            return Err(crate::rev_error!(
                argument,
                "You must specify fieldName when adding a field error."
            ));
        }
        let data = check_data(
            data,
            &format!("validation error (field: \"{}\")", field_name),
        )?;
        self.valid = false;
        self.field_errors
            .entry(field_name.to_string())
            .or_default()
            .push(FieldError {
                message: message.into(),
                code: code.map(str::to_string),
                data,
            });
        Ok(())
    }

    /// 添加模型级错误
    pub fn add_model_error(
        &mut self,
        message: impl Into<String>,
        code: Option<&str>,
        data: Option<JsonValue>,
    ) -> RevResult<()> {
        let message = message.into();
        if message.is_empty() {
            return Err(crate::rev_error!(
                argument,
                "You must specify a message for a model error."
            ));
        }
        let data = check_data(data, "model validation error")?;
        self.valid = false;
        self.model_errors.push(ModelError {
            message,
            code: code.map(str::to_string),
            data,
        });
        Ok(())
    }

    /// 指定字段的错误列表
    pub fn errors_for(&self, field_name: &str) -> &[FieldError] {
        self.field_errors
            .get(field_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 字段错误总数
    pub fn field_error_count(&self) -> usize {
        self.field_errors.values().map(Vec::len).sum()
    }
}
