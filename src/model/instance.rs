//! 模型实例
//!
//! 模型实例是"模型名 + 字段值"的组合。键不存在表示字段未定义，
//! `DataValue::Null` 表示显式设置为空。

use crate::error::RevResult;
use crate::model::meta::ModelDefinition;
use crate::types::DataValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// 模型实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    name: String,
    values: BTreeMap<String, DataValue>,
}

impl Model {
    /// 创建指定模型的空实例
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// 创建类型化模型的空实例
    pub fn of<T: ModelDefinition>() -> Self {
        Self::new(T::model_name())
    }

    /// 由已有的字段值创建实例
    pub fn from_values(name: impl Into<String>, values: BTreeMap<String, DataValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// 由 JSON 对象创建实例
    pub fn from_json(name: impl Into<String>, value: &JsonValue) -> RevResult<Self> {
        match value {
            JsonValue::Object(obj) => Ok(Self {
                name: name.into(),
                values: obj
                    .iter()
                    .map(|(k, v)| (k.clone(), DataValue::from(v.clone())))
                    .collect(),
            }),
            other => Err(crate::rev_error!(
                type_error,
                format!("model data must be a JSON object, got {}", other)
            )),
        }
    }

    /// 模型名
    pub fn model_name(&self) -> &str {
        &self.name
    }

    /// 链式设置字段值
    pub fn with(mut self, field: &str, value: impl Into<DataValue>) -> Self {
        self.set(field, value);
        self
    }

    /// 设置字段值
    pub fn set(&mut self, field: &str, value: impl Into<DataValue>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// 取消字段定义（恢复为未定义）
    pub fn unset(&mut self, field: &str) -> Option<DataValue> {
        self.values.remove(field)
    }

    /// 读取字段值，未定义时返回 None
    pub fn get(&self, field: &str) -> Option<&DataValue> {
        self.values.get(field)
    }

    /// 字段是否已定义且不为空
    pub fn is_set(&self, field: &str) -> bool {
        matches!(self.values.get(field), Some(v) if !v.is_null())
    }

    /// 实例上已定义的全部键
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn values(&self) -> &BTreeMap<String, DataValue> {
        &self.values
    }

    pub fn into_values(self) -> BTreeMap<String, DataValue> {
        self.values
    }

    /// 转换为 JSON 对象
    pub fn to_json_value(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json_value()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_undefined_and_null_are_distinct() {
        let mut model = Model::new("Person").with("name", "Bob");
        model.set("age", DataValue::Null);
        assert!(model.is_set("name"));
        assert!(!model.is_set("age"));
        assert_eq!(model.get("age"), Some(&DataValue::Null));
        assert_eq!(model.get("email"), None);
        assert_eq!(model.unset("name"), Some(DataValue::from("Bob")));
        assert_eq!(model.get("name"), None);
    }

    #[test]
    fn test_from_json_requires_object() {
        let model = Model::from_json("Person", &json!({"name": "Jane", "age": 31})).unwrap();
        assert_eq!(model.get("age"), Some(&DataValue::Int(31)));
        assert_eq!(model.to_json_value(), json!({"name": "Jane", "age": 31}));
        assert!(Model::from_json("Person", &json!([1, 2])).is_err());
    }
}
