//! 模型便捷函数模块
//!
//! 提供创建各种字段类型的便捷函数

use crate::error::RevResult;
use crate::model::field_types::{
    Field, FieldKind, FieldOptions, NumberConstraints, SelectionItem, TextConstraints,
};

/// 便捷函数：创建文本字段
pub fn text_field(name: &str, constraints: TextConstraints, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Text(constraints), options)
}

/// 便捷函数：创建电子邮件字段
pub fn email_field(name: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Email(TextConstraints::default()), options)
}

/// 便捷函数：创建URL字段
pub fn url_field(name: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Url(TextConstraints::default()), options)
}

/// 便捷函数：创建密码字段
pub fn password_field(name: &str, constraints: TextConstraints, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Password(constraints), options)
}

/// 便捷函数：创建数字字段
pub fn number_field(name: &str, constraints: NumberConstraints, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Number(constraints), options)
}

/// 便捷函数：创建整数字段
pub fn integer_field(name: &str, constraints: NumberConstraints, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Integer(constraints), options)
}

/// 便捷函数：创建自增字段
///
/// 值由后端分配，默认非必填。
pub fn auto_number_field(name: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::AutoNumber(NumberConstraints::default()), options)
}

/// 便捷函数：创建布尔字段
pub fn boolean_field(name: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Boolean, options)
}

/// 便捷函数：创建选择字段
pub fn selection_field(
    name: &str,
    selection: Vec<SelectionItem>,
    multiple: bool,
    options: FieldOptions,
) -> RevResult<Field> {
    Field::new(name, FieldKind::Selection { selection, multiple }, options)
}

/// 便捷函数：创建日期字段
pub fn date_field(name: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Date, options)
}

/// 便捷函数：创建时间字段
pub fn time_field(name: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Time, options)
}

/// 便捷函数：创建日期时间字段
pub fn datetime_field(name: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::DateTime, options)
}

/// 便捷函数：创建关联记录字段
pub fn record_field(name: &str, model: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::Record { model: model.to_string() }, options)
}

/// 便捷函数：创建关联记录列表字段
pub fn record_list_field(name: &str, model: &str, options: FieldOptions) -> RevResult<Field> {
    Field::new(name, FieldKind::RecordList { model: model.to_string() }, options)
}
