//! 查询节点树
//!
//! 解析后的 where 子句是一棵自有的树：组合节点（`$and`/`$or`）、单值节点和值列表节点。

use crate::types::{DataValue, FieldOperator, LogicalOperator};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 查询节点
#[derive(Debug, Clone)]
pub enum QueryNode {
    /// `$and` / `$or`
    Conjunction {
        operator: LogicalOperator,
        children: Vec<QueryNode>,
    },
    /// 字段操作符 + 单个值
    Value {
        field: String,
        operator: FieldOperator,
        value: DataValue,
        /// `$like` 预编译的匹配模式
        pattern: Option<Regex>,
    },
    /// `$in` / `$nin` + 值列表
    ValueList {
        field: String,
        operator: FieldOperator,
        values: Vec<DataValue>,
    },
}

/// 把 `$like` 模式转换为锚定的正则，`%` 匹配任意字符序列，区分大小写
pub fn like_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .split('%')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{}$", body))
}

/// 日期类值与字符串比较时按文本形式比较
fn coerce_pair<'a>(a: &'a DataValue, b: &'a DataValue) -> Option<(String, String)> {
    let is_temporal = |v: &DataValue| {
        matches!(v, DataValue::Date(_) | DataValue::Time(_) | DataValue::DateTime(_))
    };
    match (a, b) {
        (x, DataValue::String(s)) if is_temporal(x) => Some((x.to_string(), s.clone())),
        (DataValue::String(s), y) if is_temporal(y) => Some((s.clone(), y.to_string())),
        _ => None,
    }
}

fn values_equal(record: &DataValue, query: &DataValue) -> bool {
    match coerce_pair(record, query) {
        Some((a, b)) => a == b,
        None => record.loose_eq(query),
    }
}

fn values_compare(record: &DataValue, query: &DataValue) -> Option<Ordering> {
    if record.is_null() || query.is_null() {
        return None;
    }
    match coerce_pair(record, query) {
        Some((a, b)) => Some(a.cmp(&b)),
        None => record.compare(query),
    }
}

impl QueryNode {
    /// 判断记录是否满足该节点；记录中缺失的字段按 null 处理
    pub fn test_record(&self, record: &BTreeMap<String, DataValue>) -> bool {
        match self {
            QueryNode::Conjunction { operator, children } => match operator {
                LogicalOperator::And => children.iter().all(|c| c.test_record(record)),
                LogicalOperator::Or => children.iter().any(|c| c.test_record(record)),
            },
            QueryNode::Value {
                field,
                operator,
                value,
                pattern,
            } => {
                let actual = record.get(field).unwrap_or(&DataValue::Null);
                match operator {
                    FieldOperator::Eq => values_equal(actual, value),
                    FieldOperator::Ne => !values_equal(actual, value),
                    FieldOperator::Gt => values_compare(actual, value) == Some(Ordering::Greater),
                    FieldOperator::Gte => matches!(
                        values_compare(actual, value),
                        Some(Ordering::Greater | Ordering::Equal)
                    ),
                    FieldOperator::Lt => values_compare(actual, value) == Some(Ordering::Less),
                    FieldOperator::Lte => matches!(
                        values_compare(actual, value),
                        Some(Ordering::Less | Ordering::Equal)
                    ),
                    FieldOperator::Like => match (actual, pattern) {
                        (DataValue::String(s), Some(re)) => re.is_match(s),
                        _ => false,
                    },
                    FieldOperator::In | FieldOperator::Nin => false,
                }
            }
            QueryNode::ValueList {
                field,
                operator,
                values,
            } => {
                let actual = record.get(field).unwrap_or(&DataValue::Null);
                let found = values.iter().any(|v| values_equal(actual, v));
                match operator {
                    FieldOperator::In => found,
                    FieldOperator::Nin => !found,
                    _ => false,
                }
            }
        }
    }

    /// 节点涉及的操作符名
    pub fn operator_name(&self) -> &'static str {
        match self {
            QueryNode::Conjunction { operator, .. } => operator.as_str(),
            QueryNode::Value { operator, .. } | QueryNode::ValueList { operator, .. } => {
                operator.as_str()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(pairs: &[(&str, DataValue)]) -> BTreeMap<String, DataValue> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn leaf(field: &str, operator: FieldOperator, value: DataValue) -> QueryNode {
        let pattern = match (&operator, &value) {
            (FieldOperator::Like, DataValue::String(s)) => Some(like_to_regex(s).unwrap()),
            _ => None,
        };
        QueryNode::Value {
            field: field.to_string(),
            operator,
            value,
            pattern,
        }
    }

    #[test]
    fn test_like_escapes_regex_characters() {
        let re = like_to_regex("a.b%").unwrap();
        assert!(re.is_match("a.b and more"));
        assert!(!re.is_match("axb"));
        let re = like_to_regex("% Doe").unwrap();
        assert!(re.is_match("John Doe"));
        assert!(!re.is_match("John doe"));
        assert!(!re.is_match("John Doe Jr"));
    }

    #[test]
    fn test_comparison_operators() {
        let rec = record(&[("age", DataValue::Int(30)), ("score", DataValue::Float(4.5))]);
        assert!(leaf("age", FieldOperator::Gt, DataValue::Int(20)).test_record(&rec));
        assert!(leaf("age", FieldOperator::Gte, DataValue::Float(30.0)).test_record(&rec));
        assert!(!leaf("age", FieldOperator::Lt, DataValue::Int(30)).test_record(&rec));
        assert!(leaf("score", FieldOperator::Lte, DataValue::Int(5)).test_record(&rec));
        assert!(leaf("age", FieldOperator::Ne, DataValue::Int(31)).test_record(&rec));
    }

    #[test]
    fn test_missing_field_is_null() {
        let rec = record(&[("name", DataValue::from("Bob"))]);
        assert!(leaf("age", FieldOperator::Eq, DataValue::Null).test_record(&rec));
        assert!(!leaf("age", FieldOperator::Gt, DataValue::Int(0)).test_record(&rec));
    }

    #[test]
    fn test_dates_compare_with_strings() {
        let date = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let rec = record(&[("born", DataValue::Date(date))]);
        assert!(leaf("born", FieldOperator::Eq, DataValue::from("2020-05-01")).test_record(&rec));
        assert!(leaf("born", FieldOperator::Gt, DataValue::from("2019-12-31")).test_record(&rec));
    }

    #[test]
    fn test_value_list_and_conjunctions() {
        let rec = record(&[("colour", DataValue::from("red"))]);
        let in_node = QueryNode::ValueList {
            field: "colour".into(),
            operator: FieldOperator::In,
            values: vec!["red".into(), "blue".into()],
        };
        let nin_node = QueryNode::ValueList {
            field: "colour".into(),
            operator: FieldOperator::Nin,
            values: vec!["red".into()],
        };
        assert!(in_node.test_record(&rec));
        assert!(!nin_node.test_record(&rec));

        let or = QueryNode::Conjunction {
            operator: LogicalOperator::Or,
            children: vec![in_node.clone(), nin_node.clone()],
        };
        let and = QueryNode::Conjunction {
            operator: LogicalOperator::And,
            children: vec![in_node, nin_node],
        };
        assert!(or.test_record(&rec));
        assert!(!and.test_record(&rec));
        assert_eq!(and.operator_name(), "$and");
    }
}
