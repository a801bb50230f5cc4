//! 字段类型定义模块
//!
//! 定义模型字段的种类、选项以及由种类和选项推导出的校验器列表

use crate::config::DEFAULT_VALIDATION_TIMEOUT_MS;
use crate::error::RevResult;
use crate::model::instance::Model;
use crate::model::meta::ModelMeta;
use crate::model::validation::ModelValidationResult;
use crate::model::validators::{
    type_validators, AsyncFieldValidator, BuiltinValidator, FieldValidationContext, Validator,
};
use crate::odm::{ModelOperation, ValidationOptions};
use crate::types::DataValue;
use futures::future::try_join_all;
use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Email 字段内置的格式
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
/// URL 字段内置的格式
pub const URL_PATTERN: &str = r"^(https?|ftp)://[^\s/$.?#][^\s]*$";

/// 文本类字段的约束
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConstraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub regex: Option<String>,
}

impl TextConstraints {
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn regex(mut self, pattern: &str) -> Self {
        self.regex = Some(pattern.to_string());
        self
    }
}

/// 数值类字段的约束
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberConstraints {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl NumberConstraints {
    pub fn min_value(mut self, value: f64) -> Self {
        self.min_value = Some(value);
        self
    }

    pub fn max_value(mut self, value: f64) -> Self {
        self.max_value = Some(value);
        self
    }
}

/// 选择字段的可选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionItem {
    pub value: DataValue,
    pub label: String,
}

impl SelectionItem {
    pub fn new(value: impl Into<DataValue>, label: &str) -> Self {
        Self {
            value: value.into(),
            label: label.to_string(),
        }
    }
}

/// 字段种类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// 文本
    Text(TextConstraints),
    /// 电子邮件（带内置格式）
    Email(TextConstraints),
    /// URL（带内置格式）
    Url(TextConstraints),
    /// 密码
    Password(TextConstraints),
    /// 数字
    Number(NumberConstraints),
    /// 整数
    Integer(NumberConstraints),
    /// 自增整数，值总是由后端分配
    AutoNumber(NumberConstraints),
    /// 布尔
    Boolean,
    /// 单选或多选
    Selection {
        selection: Vec<SelectionItem>,
        multiple: bool,
    },
    /// 日期（YYYY-MM-DD）
    Date,
    /// 时间（HH:MM:SS）
    Time,
    /// 日期时间（YYYY-MM-DDTHH:MM:SS）
    DateTime,
    /// 关联记录
    Record { model: String },
    /// 关联记录列表
    RecordList { model: String },
}

impl FieldKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::Text(_) => "TextField",
            FieldKind::Email(_) => "EmailField",
            FieldKind::Url(_) => "URLField",
            FieldKind::Password(_) => "PasswordField",
            FieldKind::Number(_) => "NumberField",
            FieldKind::Integer(_) => "IntegerField",
            FieldKind::AutoNumber(_) => "AutoNumberField",
            FieldKind::Boolean => "BooleanField",
            FieldKind::Selection { .. } => "SelectionField",
            FieldKind::Date => "DateField",
            FieldKind::Time => "TimeField",
            FieldKind::DateTime => "DateTimeField",
            FieldKind::Record { .. } => "RecordField",
            FieldKind::RecordList { .. } => "RecordListField",
        }
    }

    pub fn is_auto_number(&self) -> bool {
        matches!(self, FieldKind::AutoNumber(_))
    }
}

/// 字段选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// 显示名，未设置时使用字段名
    pub label: Option<String>,
    /// 是否必填；未设置时除自增字段外都视为必填
    pub required: Option<bool>,
    /// 是否为主键
    pub primary_key: bool,
    /// 默认值
    pub default: Option<DataValue>,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<DataValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// 模型字段
///
/// 构造时根据种类和选项生成内置校验器列表，之后可以追加自定义校验器。
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub options: FieldOptions,
    regex: Option<Regex>,
    pub validators: Vec<Validator>,
    pub async_validators: Vec<Arc<dyn AsyncFieldValidator>>,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("validators", &self.validators)
            .field("async_validators", &self.async_validators.len())
            .finish()
    }
}

impl Field {
    /// 创建字段
    pub fn new(name: &str, kind: FieldKind, options: FieldOptions) -> RevResult<Self> {
        if name.is_empty() {
            return Err(crate::rev_error!(argument, "new fields must have a name"));
        }
        if let FieldKind::Record { model } | FieldKind::RecordList { model } = &kind {
            if model.is_empty() {
                return Err(crate::rev_error!(
                    argument,
                    "RecordFieldError: options.model must be a non-empty string"
                ));
            }
        }

        let pattern = match &kind {
            FieldKind::Text(c) | FieldKind::Password(c) => c.regex.clone(),
            FieldKind::Email(c) => Some(c.regex.clone().unwrap_or_else(|| EMAIL_PATTERN.to_string())),
            FieldKind::Url(c) => Some(c.regex.clone().unwrap_or_else(|| URL_PATTERN.to_string())),
            _ => None,
        };
        let regex = pattern
            .map(|p| {
                Regex::new(&p).map_err(|e| {
                    crate::rev_error!(argument, format!("field '{}' has an invalid regex: {}", name, e))
                })
            })
            .transpose()?;

        let required = options
            .required
            .unwrap_or(!kind.is_auto_number());
        let mut validators = Vec::new();
        if required {
            validators.push(Validator::Builtin(BuiltinValidator::Required));
        }
        validators.extend(type_validators(&kind, required).into_iter().map(Validator::Builtin));

        Ok(Self {
            name: name.to_string(),
            kind,
            options,
            regex,
            validators,
            async_validators: Vec::new(),
        })
    }

    /// 追加同步自定义校验器
    pub fn with_validator<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&FieldValidationContext<'_>) -> RevResult<()> + Send + Sync + 'static,
    {
        self.validators.push(Validator::Custom {
            name: name.to_string(),
            func: Arc::new(func),
        });
        self
    }

    /// 追加异步自定义校验器
    pub fn with_async_validator(mut self, validator: Arc<dyn AsyncFieldValidator>) -> Self {
        self.async_validators.push(validator);
        self
    }

    /// 显示名
    pub fn label(&self) -> &str {
        self.options.label.as_deref().unwrap_or(&self.name)
    }

    pub fn is_required(&self) -> bool {
        self.options.required.unwrap_or(!self.kind.is_auto_number())
    }

    pub fn is_primary_key(&self) -> bool {
        self.options.primary_key
    }

    pub fn compiled_regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    pub fn text_constraints(&self) -> Option<&TextConstraints> {
        match &self.kind {
            FieldKind::Text(c) | FieldKind::Email(c) | FieldKind::Url(c) | FieldKind::Password(c) => {
                Some(c)
            }
            _ => None,
        }
    }

    pub fn number_constraints(&self) -> Option<&NumberConstraints> {
        match &self.kind {
            FieldKind::Number(c) | FieldKind::Integer(c) | FieldKind::AutoNumber(c) => Some(c),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&[SelectionItem]> {
        match &self.kind {
            FieldKind::Selection { selection, .. } => Some(selection),
            _ => None,
        }
    }

    pub fn related_model(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Record { model } | FieldKind::RecordList { model } => Some(model),
            _ => None,
        }
    }

    /// 依次运行全部同步校验器
    pub(crate) fn run_sync_validators(&self, ctx: &FieldValidationContext<'_>) -> RevResult<()> {
        for validator in &self.validators {
            validator.run(ctx)?;
        }
        Ok(())
    }

    /// 并发运行全部异步校验器，任一校验器出错即返回
    pub(crate) async fn run_async_validators(&self, ctx: &FieldValidationContext<'_>) -> RevResult<()> {
        if self.async_validators.is_empty() {
            return Ok(());
        }
        try_join_all(self.async_validators.iter().map(|v| v.validate(ctx))).await?;
        Ok(())
    }

    /// 校验模型实例上的当前字段
    ///
    /// 先运行同步校验器，再把异步校验器作为一批并发运行；超时后丢弃整批校验。
    pub async fn validate(
        &self,
        model: &Model,
        meta: &ModelMeta,
        operation: &ModelOperation,
        result: &Mutex<ModelValidationResult>,
        options: &ValidationOptions,
    ) -> RevResult<()> {
        if model.model_name() != meta.name {
            return Err(crate::rev_error!(
                type_error,
                format!(
                    "Field.validate(): the supplied model is not a model instance of '{}'",
                    meta.name
                )
            ));
        }
        let ctx = FieldValidationContext {
            model,
            field: self,
            meta,
            operation,
            result,
            options,
        };
        self.run_sync_validators(&ctx)?;

        let timeout_ms = options.timeout_ms.unwrap_or(DEFAULT_VALIDATION_TIMEOUT_MS);
        match tokio::time::timeout(Duration::from_millis(timeout_ms), self.run_async_validators(&ctx)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(crate::rev_error!(
                timeout,
                format!(
                    "Field.validate() - timed out after {} milliseconds",
                    timeout_ms
                )
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(field: &Field) -> Vec<&str> {
        field.validators.iter().map(|v| v.name()).collect()
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = Field::new("", FieldKind::Boolean, FieldOptions::new()).unwrap_err();
        assert!(err.to_string().contains("new fields must have a name"));
    }

    #[test]
    fn test_text_validator_order() {
        let field = Field::new(
            "name",
            FieldKind::Text(TextConstraints::default().min_length(2).max_length(10).regex("^[a-z]+$")),
            FieldOptions::new(),
        )
        .unwrap();
        assert_eq!(
            names(&field),
            vec!["required", "string", "string_empty", "min_length", "max_length", "regex"]
        );

        let optional = Field::new("nick", FieldKind::Text(TextConstraints::default()), FieldOptions::new().required(false))
            .unwrap();
        assert_eq!(names(&optional), vec!["string"]);
    }

    #[test]
    fn test_integer_validator_comes_before_number() {
        let field = Field::new(
            "age",
            FieldKind::Integer(NumberConstraints::default().min_value(0.0)),
            FieldOptions::new(),
        )
        .unwrap();
        assert_eq!(names(&field), vec!["required", "integer", "number", "min_value"]);
    }

    #[test]
    fn test_auto_number_is_optional_by_default() {
        let field = Field::new("id", FieldKind::AutoNumber(NumberConstraints::default()), FieldOptions::new())
            .unwrap();
        assert!(!field.is_required());
        assert_eq!(names(&field), vec!["integer", "number"]);
    }

    #[test]
    fn test_multiple_selection_validators() {
        let kind = FieldKind::Selection {
            selection: vec![SelectionItem::new("a", "A")],
            multiple: true,
        };
        let field = Field::new("tags", kind, FieldOptions::new()).unwrap();
        assert_eq!(names(&field), vec!["required", "list_empty", "multiple_selection"]);
    }

    #[test]
    fn test_record_field_requires_model_name() {
        let err = Field::new("owner", FieldKind::Record { model: String::new() }, FieldOptions::new())
            .unwrap_err();
        assert!(err.to_string().contains("options.model must be a non-empty string"));
    }

    #[test]
    fn test_invalid_regex_fails_at_construction() {
        let result = Field::new(
            "code",
            FieldKind::Text(TextConstraints::default().regex("([a-z")),
            FieldOptions::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_email_field_has_builtin_regex() {
        let field = Field::new("email", FieldKind::Email(TextConstraints::default()), FieldOptions::new().label("E-mail"))
            .unwrap();
        let regex = field.compiled_regex().unwrap();
        assert!(regex.is_match("bob@example.com"));
        assert!(!regex.is_match("not-an-email"));
        assert_eq!(field.label(), "E-mail");
    }
}
