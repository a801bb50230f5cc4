use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::Model;

/// 通用数据值类型 - 模型字段值与存储记录的统一表示
///
/// 缺失的键表示"未定义"，`DataValue::Null` 表示显式的空值，两者在校验中语义不同。
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 浮点数
    Float(f64),
    /// 字符串
    String(String),
    /// 日期（不含时间）
    Date(NaiveDate),
    /// 时间（不含日期）
    Time(NaiveTime),
    /// 日期时间
    DateTime(NaiveDateTime),
    /// 数组
    Array(Vec<DataValue>),
    /// 普通对象
    Object(BTreeMap<String, DataValue>),
    /// 关联模型实例
    Record(Box<Model>),
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Null => write!(f, "null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DataValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            DataValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            DataValue::Array(_) | DataValue::Object(_) | DataValue::Record(_) => {
                write!(f, "{}", self.to_json_value())
            }
        }
    }
}

impl std::fmt::Debug for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Debug 与 Display 保持一致，显示实际值
        match self {
            DataValue::String(s) => write!(f, "{:?}", s),
            _ => write!(f, "{}", self),
        }
    }
}

impl DataValue {
    /// 获取数据类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) => "integer",
            DataValue::Float(_) => "float",
            DataValue::String(_) => "string",
            DataValue::Date(_) => "date",
            DataValue::Time(_) => "time",
            DataValue::DateTime(_) => "datetime",
            DataValue::Array(_) => "array",
            DataValue::Object(_) => "object",
            DataValue::Record(_) => "record",
        }
    }

    /// 判断是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// 是否为可直接作为查询操作数的标量值
    ///
    /// 数组和普通对象不是字段值；日期、时间和空值是。
    pub fn is_field_value(&self) -> bool {
        !matches!(
            self,
            DataValue::Array(_) | DataValue::Object(_) | DataValue::Record(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            DataValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// 数值视图：整数、浮点数，以及可解析为数字的字符串
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DataValue::Int(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            DataValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// 宽松相等：整数与浮点数按数值比较，其余按结构比较
    pub fn loose_eq(&self, other: &DataValue) -> bool {
        match (self, other) {
            (DataValue::Int(a), DataValue::Float(b)) | (DataValue::Float(b), DataValue::Int(a)) => {
                (*a as f64) == *b
            }
            _ => self == other,
        }
    }

    /// 同类值之间的排序比较，类型不可比时返回 None
    pub fn compare(&self, other: &DataValue) -> Option<Ordering> {
        match (self, other) {
            (DataValue::Null, DataValue::Null) => Some(Ordering::Equal),
            (DataValue::Bool(a), DataValue::Bool(b)) => Some(a.cmp(b)),
            (DataValue::Int(a), DataValue::Int(b)) => Some(a.cmp(b)),
            (DataValue::Int(_), DataValue::Float(_))
            | (DataValue::Float(_), DataValue::Int(_))
            | (DataValue::Float(_), DataValue::Float(_)) => {
                self.as_number()?.partial_cmp(&other.as_number()?)
            }
            (DataValue::String(a), DataValue::String(b)) => Some(a.cmp(b)),
            (DataValue::Date(a), DataValue::Date(b)) => Some(a.cmp(b)),
            (DataValue::Time(a), DataValue::Time(b)) => Some(a.cmp(b)),
            (DataValue::DateTime(a), DataValue::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// 排序用的全序比较：空值排在最前，不可比的值视为相等
    pub fn sort_cmp(&self, other: &DataValue) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self.compare(other).unwrap_or(Ordering::Equal),
        }
    }

    /// 转换为 JSON 值
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            DataValue::Null => serde_json::Value::Null,
            DataValue::Bool(b) => serde_json::Value::Bool(*b),
            DataValue::Int(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
            DataValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DataValue::String(s) => serde_json::Value::String(s.clone()),
            DataValue::Date(_) | DataValue::Time(_) | DataValue::DateTime(_) => {
                serde_json::Value::String(self.to_string())
            }
            DataValue::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(|v| v.to_json_value()).collect())
            }
            DataValue::Object(obj) => serde_json::Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
            DataValue::Record(model) => model.to_json_value(),
        }
    }

    /// 从 JSON 值转换（整数保持为 Int，其余数字为 Float）
    pub fn from_json_value(value: serde_json::Value) -> Self {
        json_value_to_data_value(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value as i64)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        DataValue::Date(value)
    }
}

impl From<NaiveTime> for DataValue {
    fn from(value: NaiveTime) -> Self {
        DataValue::Time(value)
    }
}

impl From<NaiveDateTime> for DataValue {
    fn from(value: NaiveDateTime) -> Self {
        DataValue::DateTime(value)
    }
}

impl From<Model> for DataValue {
    fn from(value: Model) -> Self {
        DataValue::Record(Box::new(value))
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(value: Vec<T>) -> Self {
        DataValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        json_value_to_data_value(value)
    }
}

/// 将 serde_json::Value 转换为对应的 DataValue 类型
pub fn json_value_to_data_value(value: serde_json::Value) -> DataValue {
    match value {
        serde_json::Value::Null => DataValue::Null,
        serde_json::Value::Bool(b) => DataValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Int(i)
            } else {
                n.as_f64().map(DataValue::Float).unwrap_or(DataValue::Null)
            }
        }
        serde_json::Value::String(s) => DataValue::String(s),
        serde_json::Value::Array(arr) => {
            DataValue::Array(arr.into_iter().map(json_value_to_data_value).collect())
        }
        serde_json::Value::Object(obj) => DataValue::Object(
            obj.into_iter()
                .map(|(k, v)| (k, json_value_to_data_value(v)))
                .collect(),
        ),
    }
}
