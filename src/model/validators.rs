//! 字段校验器
//!
//! 内置校验器只向共享的校验结果追加错误，不会因为值不合法而返回 `Err`；
//! 只有校验器配置本身有问题（例如缺少 min_length）时才返回错误。

use crate::error::RevResult;
use crate::i18n::validation_msg;
use crate::model::field_types::{Field, FieldKind};
use crate::model::instance::Model;
use crate::model::meta::ModelMeta;
use crate::model::validation::ModelValidationResult;
use crate::odm::{ModelOperation, ValidationOptions};
use crate::types::DataValue;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::sync::Arc;

static DATE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static TIME_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").expect("valid time regex"));
static DATETIME_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$").expect("valid datetime regex")
});
static INTEGER_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid integer regex"));

/// 字段校验上下文
///
/// 同一次校验中的所有校验器共享 `result`，锁只在追加错误时短暂持有。
pub struct FieldValidationContext<'a> {
    pub model: &'a Model,
    pub field: &'a Field,
    pub meta: &'a ModelMeta,
    pub operation: &'a ModelOperation,
    pub result: &'a Mutex<ModelValidationResult>,
    pub options: &'a ValidationOptions,
}

impl<'a> FieldValidationContext<'a> {
    /// 当前字段值，未定义时为 None
    pub fn value(&self) -> Option<&'a DataValue> {
        self.model.get(&self.field.name)
    }

    /// 为当前字段追加错误
    pub fn add_error(&self, message: String, code: &str) -> RevResult<()> {
        self.result
            .lock()
            .add_field_error(&self.field.name, message, Some(code), None)
    }

    fn fail(&self, code: &str) -> RevResult<()> {
        self.add_error(validation_msg(code, self.field.label(), &[]), code)
    }
}

/// 同步自定义校验函数
pub type ValidatorFn = Arc<dyn Fn(&FieldValidationContext<'_>) -> RevResult<()> + Send + Sync>;

/// 异步字段校验器
#[async_trait]
pub trait AsyncFieldValidator: Send + Sync {
    /// 校验器名称（用于日志）
    fn name(&self) -> &str {
        "async_validator"
    }

    async fn validate(&self, ctx: &FieldValidationContext<'_>) -> RevResult<()>;
}

/// 内置校验器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinValidator {
    Required,
    String,
    StringEmpty,
    Regex,
    Number,
    Integer,
    Boolean,
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    SingleSelection,
    MultipleSelection,
    ListEmpty,
    RecordClass,
    RecordListClass,
    DateOnly,
    TimeOnly,
    DateTime,
}

impl BuiltinValidator {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinValidator::Required => "required",
            BuiltinValidator::String => "string",
            BuiltinValidator::StringEmpty => "string_empty",
            BuiltinValidator::Regex => "regex",
            BuiltinValidator::Number => "number",
            BuiltinValidator::Integer => "integer",
            BuiltinValidator::Boolean => "boolean",
            BuiltinValidator::MinLength => "min_length",
            BuiltinValidator::MaxLength => "max_length",
            BuiltinValidator::MinValue => "min_value",
            BuiltinValidator::MaxValue => "max_value",
            BuiltinValidator::SingleSelection => "single_selection",
            BuiltinValidator::MultipleSelection => "multiple_selection",
            BuiltinValidator::ListEmpty => "list_empty",
            BuiltinValidator::RecordClass => "record_class",
            BuiltinValidator::RecordListClass => "record_list_class",
            BuiltinValidator::DateOnly => "date_only",
            BuiltinValidator::TimeOnly => "time_only",
            BuiltinValidator::DateTime => "datetime",
        }
    }

    pub fn run(&self, ctx: &FieldValidationContext<'_>) -> RevResult<()> {
        match self {
            BuiltinValidator::Required => required_validator(ctx),
            BuiltinValidator::String => string_validator(ctx),
            BuiltinValidator::StringEmpty => string_empty_validator(ctx),
            BuiltinValidator::Regex => regex_validator(ctx),
            BuiltinValidator::Number => number_validator(ctx),
            BuiltinValidator::Integer => integer_validator(ctx),
            BuiltinValidator::Boolean => boolean_validator(ctx),
            BuiltinValidator::MinLength => min_length_validator(ctx),
            BuiltinValidator::MaxLength => max_length_validator(ctx),
            BuiltinValidator::MinValue => min_value_validator(ctx),
            BuiltinValidator::MaxValue => max_value_validator(ctx),
            BuiltinValidator::SingleSelection => single_selection_validator(ctx),
            BuiltinValidator::MultipleSelection => multiple_selection_validator(ctx),
            BuiltinValidator::ListEmpty => list_empty_validator(ctx),
            BuiltinValidator::RecordClass => record_class_validator(ctx),
            BuiltinValidator::RecordListClass => record_list_class_validator(ctx),
            BuiltinValidator::DateOnly => date_only_validator(ctx),
            BuiltinValidator::TimeOnly => time_only_validator(ctx),
            BuiltinValidator::DateTime => datetime_validator(ctx),
        }
    }
}

/// 同步校验器：内置或自定义
#[derive(Clone)]
pub enum Validator {
    Builtin(BuiltinValidator),
    Custom { name: String, func: ValidatorFn },
}

impl Validator {
    pub fn name(&self) -> &str {
        match self {
            Validator::Builtin(b) => b.name(),
            Validator::Custom { name, .. } => name,
        }
    }

    pub fn run(&self, ctx: &FieldValidationContext<'_>) -> RevResult<()> {
        match self {
            Validator::Builtin(b) => b.run(ctx),
            Validator::Custom { func, .. } => func(ctx),
        }
    }

    /// 是否为指定的内置校验器
    pub fn is(&self, builtin: BuiltinValidator) -> bool {
        matches!(self, Validator::Builtin(b) if *b == builtin)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validator::Builtin(b) => write!(f, "Builtin({:?})", b),
            Validator::Custom { name, .. } => write!(f, "Custom({})", name),
        }
    }
}

fn missing(value: Option<&DataValue>) -> bool {
    matches!(value, None | Some(DataValue::Null))
}

fn misconfigured(ctx: &FieldValidationContext<'_>, option: &str) -> crate::error::RevError {
    crate::rev_error!(
        config,
        format!(
            "field '{}' has a {} validator but no {} option",
            ctx.field.name, option, option
        )
    )
}

pub fn required_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    if missing(ctx.value()) {
        ctx.fail("required")?;
    }
    Ok(())
}

pub fn string_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    match ctx.value() {
        None | Some(DataValue::Null) | Some(DataValue::String(_)) => Ok(()),
        Some(_) => ctx.fail("not_a_string"),
    }
}

/// 只有长度为零的字符串才算空；纯空白字符串是有效的
pub fn string_empty_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    match ctx.value() {
        Some(DataValue::String(s)) if s.is_empty() => ctx.fail("string_empty"),
        _ => Ok(()),
    }
}

pub fn regex_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let regex = ctx
        .field
        .compiled_regex()
        .ok_or_else(|| misconfigured(ctx, "regex"))?;
    match ctx.value() {
        Some(DataValue::String(s)) if !regex.is_match(s) => ctx.fail("no_regex_match"),
        _ => Ok(()),
    }
}

pub fn number_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let valid = match ctx.value() {
        None | Some(DataValue::Null) => true,
        Some(DataValue::Int(_)) => true,
        Some(DataValue::Float(f)) => !f.is_nan(),
        Some(DataValue::String(s)) => !s.is_empty() && s.trim().parse::<f64>().is_ok(),
        Some(_) => false,
    };
    if !valid {
        ctx.fail("not_a_number")?;
    }
    Ok(())
}

pub fn integer_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let valid = match ctx.value() {
        None | Some(DataValue::Null) => true,
        Some(DataValue::Int(_)) => true,
        Some(DataValue::Float(f)) => f.is_finite() && f.fract() == 0.0,
        Some(DataValue::String(s)) => INTEGER_STRING.is_match(s),
        Some(_) => false,
    };
    if !valid {
        ctx.fail("not_an_integer")?;
    }
    Ok(())
}

pub fn boolean_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    match ctx.value() {
        None | Some(DataValue::Null) | Some(DataValue::Bool(_)) => Ok(()),
        Some(_) => ctx.fail("not_a_boolean"),
    }
}

pub fn min_length_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let min = ctx
        .field
        .text_constraints()
        .and_then(|c| c.min_length)
        .ok_or_else(|| misconfigured(ctx, "min_length"))?;
    if let Some(DataValue::String(s)) = ctx.value() {
        if s.chars().count() < min {
            ctx.add_error(
                validation_msg("min_string_length", ctx.field.label(), &[("length", &min.to_string())]),
                "min_string_length",
            )?;
        }
    }
    Ok(())
}

pub fn max_length_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let max = ctx
        .field
        .text_constraints()
        .and_then(|c| c.max_length)
        .ok_or_else(|| misconfigured(ctx, "max_length"))?;
    if let Some(DataValue::String(s)) = ctx.value() {
        if s.chars().count() > max {
            ctx.add_error(
                validation_msg("max_string_length", ctx.field.label(), &[("length", &max.to_string())]),
                "max_string_length",
            )?;
        }
    }
    Ok(())
}

pub fn min_value_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let min = ctx
        .field
        .number_constraints()
        .and_then(|c| c.min_value)
        .ok_or_else(|| misconfigured(ctx, "min_value"))?;
    if let Some(n) = ctx.value().and_then(DataValue::as_number) {
        if n < min {
            ctx.add_error(
                validation_msg("min_value", ctx.field.label(), &[("value", &min.to_string())]),
                "min_value",
            )?;
        }
    }
    Ok(())
}

pub fn max_value_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let max = ctx
        .field
        .number_constraints()
        .and_then(|c| c.max_value)
        .ok_or_else(|| misconfigured(ctx, "max_value"))?;
    if let Some(n) = ctx.value().and_then(DataValue::as_number) {
        if n > max {
            ctx.add_error(
                validation_msg("max_value", ctx.field.label(), &[("value", &max.to_string())]),
                "max_value",
            )?;
        }
    }
    Ok(())
}

fn in_selection(ctx: &FieldValidationContext<'_>, value: &DataValue) -> RevResult<bool> {
    let selection = ctx
        .field
        .selection()
        .ok_or_else(|| misconfigured(ctx, "selection"))?;
    Ok(value.is_field_value() && selection.iter().any(|item| item.value.loose_eq(value)))
}

pub fn single_selection_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    match ctx.value() {
        None | Some(DataValue::Null) => Ok(()),
        Some(value) => {
            if !in_selection(ctx, value)? {
                ctx.fail("no_selection_match")?;
            }
            Ok(())
        }
    }
}

/// 多选：值必须是数组，且每个元素都在可选项中；空数组是有效的
pub fn multiple_selection_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    match ctx.value() {
        None | Some(DataValue::Null) => Ok(()),
        Some(DataValue::Array(items)) => {
            for item in items {
                if !in_selection(ctx, item)? {
                    return ctx.fail("no_selection_match");
                }
            }
            Ok(())
        }
        Some(_) => ctx.fail("no_selection_match"),
    }
}

pub fn list_empty_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    match ctx.value() {
        Some(DataValue::Array(items)) if items.is_empty() => ctx.fail("list_empty"),
        _ => Ok(()),
    }
}

fn related_model<'a>(ctx: &FieldValidationContext<'a>) -> RevResult<&'a str> {
    ctx.field
        .related_model()
        .ok_or_else(|| misconfigured(ctx, "model"))
}

pub fn record_class_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let model_name = related_model(ctx)?;
    match ctx.value() {
        None | Some(DataValue::Null) => Ok(()),
        Some(DataValue::Record(record)) if record.model_name() == model_name => Ok(()),
        Some(_) => ctx.fail("invalid_record"),
    }
}

/// 记录列表：未定义时跳过；null 不跳过，视为无效
pub fn record_list_class_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let model_name = related_model(ctx)?;
    let valid = match ctx.value() {
        None => true,
        Some(DataValue::Array(items)) => items
            .iter()
            .all(|item| matches!(item, DataValue::Record(r) if r.model_name() == model_name)),
        Some(_) => false,
    };
    if !valid {
        ctx.fail("invalid_record")?;
    }
    Ok(())
}

fn is_date_string(s: &str) -> bool {
    DATE_FORMAT.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_time_string(s: &str) -> bool {
    TIME_FORMAT.is_match(s) && NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok()
}

fn is_datetime_string(s: &str) -> bool {
    DATETIME_FORMAT.is_match(s) && NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
}

pub fn date_only_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let valid = match ctx.value() {
        None | Some(DataValue::Null) => true,
        Some(DataValue::Date(_)) | Some(DataValue::DateTime(_)) => true,
        Some(DataValue::String(s)) => is_date_string(s),
        Some(_) => false,
    };
    if !valid {
        ctx.fail("not_a_date")?;
    }
    Ok(())
}

pub fn time_only_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let valid = match ctx.value() {
        None | Some(DataValue::Null) => true,
        Some(DataValue::Time(_)) | Some(DataValue::DateTime(_)) => true,
        Some(DataValue::String(s)) => is_time_string(s),
        Some(_) => false,
    };
    if !valid {
        ctx.fail("not_a_time")?;
    }
    Ok(())
}

pub fn datetime_validator(ctx: &FieldValidationContext<'_>) -> RevResult<()> {
    let valid = match ctx.value() {
        None | Some(DataValue::Null) => true,
        Some(DataValue::DateTime(_)) => true,
        Some(DataValue::String(s)) => is_datetime_string(s),
        Some(_) => false,
    };
    if !valid {
        ctx.fail("not_a_datetime")?;
    }
    Ok(())
}

/// 字段类型对应的内置校验器列表（不含 required）
pub(crate) fn type_validators(kind: &FieldKind, required: bool) -> Vec<BuiltinValidator> {
    use BuiltinValidator as V;
    let mut list = Vec::new();
    match kind {
        FieldKind::Text(c) | FieldKind::Email(c) | FieldKind::Url(c) | FieldKind::Password(c) => {
            list.push(V::String);
            if required {
                list.push(V::StringEmpty);
            }
            if c.min_length.is_some() {
                list.push(V::MinLength);
            }
            if c.max_length.is_some() {
                list.push(V::MaxLength);
            }
            if c.regex.is_some() || matches!(kind, FieldKind::Email(_) | FieldKind::Url(_)) {
                list.push(V::Regex);
            }
        }
        FieldKind::Number(c) => {
            list.push(V::Number);
            push_range(&mut list, c.min_value, c.max_value);
        }
        FieldKind::Integer(c) | FieldKind::AutoNumber(c) => {
            list.push(V::Integer);
            list.push(V::Number);
            push_range(&mut list, c.min_value, c.max_value);
        }
        FieldKind::Boolean => list.push(V::Boolean),
        FieldKind::Selection { multiple, .. } => {
            if *multiple {
                if required {
                    list.push(V::ListEmpty);
                }
                list.push(V::MultipleSelection);
            } else {
                list.push(V::SingleSelection);
            }
        }
        FieldKind::Date => list.push(V::DateOnly),
        FieldKind::Time => list.push(V::TimeOnly),
        FieldKind::DateTime => list.push(V::DateTime),
        FieldKind::Record { .. } => list.push(V::RecordClass),
        FieldKind::RecordList { .. } => list.push(V::RecordListClass),
    }
    list
}

fn push_range(list: &mut Vec<BuiltinValidator>, min: Option<f64>, max: Option<f64>) {
    if min.is_some() {
        list.push(BuiltinValidator::MinValue);
    }
    if max.is_some() {
        list.push(BuiltinValidator::MaxValue);
    }
}
