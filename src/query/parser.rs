//! where 子句解析器
//!
//! 把 JSON 形式的 where 子句解析为 `QueryNode` 树，并按模型元数据检查字段名。

use crate::error::RevResult;
use crate::model::ModelMeta;
use crate::query::nodes::{like_to_regex, QueryNode};
use crate::types::{DataValue, FieldOperator, LogicalOperator};
use rat_logger::debug;
use serde_json::{Map, Value as JsonValue};

/// 查询解析器
pub struct QueryParser;

/// 可作为字段值的 JSON：标量或 null
fn is_field_value(value: &JsonValue) -> bool {
    !matches!(value, JsonValue::Array(_) | JsonValue::Object(_))
}

impl QueryParser {
    /// 解析 where 子句；顶层的多个键以 `$and` 组合
    pub fn get_query_node_for_query(meta: &ModelMeta, query: &JsonValue) -> RevResult<QueryNode> {
        meta.check_initialised()?;
        let node = match query {
            JsonValue::Object(obj) => Self::parse_conjunction(meta, LogicalOperator::And, obj)?,
            other => {
                return Err(crate::rev_error!(
                    query,
                    format!("query must be an object, got {}", other)
                ));
            }
        };
        debug!("解析查询 {}: {} -> {:?}", meta.name, query, node);
        Ok(node)
    }

    fn parse_conjunction(
        meta: &ModelMeta,
        operator: LogicalOperator,
        obj: &Map<String, JsonValue>,
    ) -> RevResult<QueryNode> {
        let mut children = Vec::with_capacity(obj.len());
        for (key, value) in obj {
            children.push(Self::parse_key(meta, key, value)?);
        }
        Ok(QueryNode::Conjunction { operator, children })
    }

    fn parse_key(meta: &ModelMeta, key: &str, value: &JsonValue) -> RevResult<QueryNode> {
        if let Some(operator) = LogicalOperator::from_key(key) {
            let items = value.as_array().ok_or_else(|| {
                crate::rev_error!(
                    query,
                    format!("value for '{}' must be an array of objects", key)
                )
            })?;
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                let obj = item.as_object().ok_or_else(|| {
                    crate::rev_error!(
                        query,
                        format!("value for '{}' must be an array of objects", key)
                    )
                })?;
                children.push(Self::parse_conjunction(meta, LogicalOperator::And, obj)?);
            }
            return Ok(QueryNode::Conjunction { operator, children });
        }

        if key.starts_with('$') {
            return Err(crate::rev_error!(
                query,
                format!("unrecognised operator '{}'", key)
            ));
        }
        if !meta.has_field(key) {
            return Err(crate::rev_error!(
                query,
                format!("field '{}' does not exist in model {}", key, meta.name)
            ));
        }

        match value {
            JsonValue::Object(ops) if ops.is_empty() => Err(crate::rev_error!(
                query,
                format!("invalid field value '{}'", value)
            )),
            JsonValue::Object(ops) => {
                let mut leaves = Vec::with_capacity(ops.len());
                for (op_key, operand) in ops {
                    leaves.push(Self::parse_field_operator(key, op_key, operand)?);
                }
                if leaves.len() == 1 {
                    Ok(leaves.remove(0))
                } else {
                    Ok(QueryNode::Conjunction {
                        operator: LogicalOperator::And,
                        children: leaves,
                    })
                }
            }
            scalar if is_field_value(scalar) => Self::parse_field_operator(key, "$eq", scalar),
            other => Err(crate::rev_error!(
                query,
                format!("invalid field value '{}'", other)
            )),
        }
    }

    fn parse_field_operator(field: &str, op_key: &str, operand: &JsonValue) -> RevResult<QueryNode> {
        let operator = FieldOperator::from_key(op_key).ok_or_else(|| {
            crate::rev_error!(query, format!("unrecognised field operator '{}'", op_key))
        })?;

        if operator.takes_list() {
            let items = operand.as_array().ok_or_else(|| {
                crate::rev_error!(
                    query,
                    format!("value for '{}' must be an array", operator)
                )
            })?;
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                if !is_field_value(item) {
                    return Err(crate::rev_error!(
                        query,
                        format!("invalid field value '{}'", item)
                    ));
                }
                values.push(DataValue::from(item.clone()));
            }
            return Ok(QueryNode::ValueList {
                field: field.to_string(),
                operator,
                values,
            });
        }

        if !is_field_value(operand) {
            return Err(crate::rev_error!(
                query,
                format!("invalid field value '{}'", operand)
            ));
        }
        let pattern = if operator == FieldOperator::Like {
            let text = operand.as_str().ok_or_else(|| {
                crate::rev_error!(query, "value for '$like' must be a string")
            })?;
            Some(like_to_regex(text).map_err(|e| {
                crate::rev_error!(query, format!("invalid '$like' pattern: {}", e))
            })?)
        } else {
            None
        };
        Ok(QueryNode::Value {
            field: field.to_string(),
            operator,
            value: DataValue::from(operand.clone()),
            pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{integer_field, text_field, FieldOptions, NumberConstraints, TextConstraints};
    use serde_json::json;

    fn meta() -> ModelMeta {
        let mut meta = ModelMeta::new("Person")
            .field(text_field("name", TextConstraints::default(), FieldOptions::new()).unwrap())
            .field(integer_field("age", NumberConstraints::default(), FieldOptions::new()).unwrap());
        meta.initialise("default").unwrap();
        meta
    }

    #[test]
    fn test_scalar_is_shorthand_for_eq() {
        let node = QueryParser::get_query_node_for_query(&meta(), &json!({"name": "Bob"})).unwrap();
        match node {
            QueryNode::Conjunction { operator, children } => {
                assert_eq!(operator, LogicalOperator::And);
                assert!(matches!(
                    &children[0],
                    QueryNode::Value { operator: FieldOperator::Eq, value: DataValue::String(s), .. } if s == "Bob"
                ));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_nested_or() {
        let query = json!({"$or": [{"name": "Bob"}, {"age": {"$gte": 30, "$lt": 40}}]});
        let node = QueryParser::get_query_node_for_query(&meta(), &query).unwrap();
        let QueryNode::Conjunction { children, .. } = node else {
            panic!("expected conjunction");
        };
        let QueryNode::Conjunction { operator, children: or_children } = &children[0] else {
            panic!("expected $or");
        };
        assert_eq!(*operator, LogicalOperator::Or);
        assert_eq!(or_children.len(), 2);
    }

    #[test]
    fn test_parser_errors() {
        let meta = meta();
        let cases = [
            (json!({"star_sign": "Leo"}), "field 'star_sign' does not exist"),
            (json!({"name": {"$regex": "x"}}), "unrecognised field operator '$regex'"),
            (json!({"name": {"$eq": {"a": 1}}}), "invalid field value"),
            (json!({"name": {}}), "invalid field value '{}'"),
            (json!({"name": {"$in": "Bob"}}), "value for '$in' must be an array"),
            (json!({"$and": {"name": "Bob"}}), "must be an array of objects"),
            (json!({"$not": []}), "unrecognised operator '$not'"),
            (json!(["name"]), "query must be an object"),
        ];
        for (query, expected) in cases {
            let err = QueryParser::get_query_node_for_query(&meta, &query).unwrap_err();
            assert!(err.to_string().contains(expected), "{} should contain {}", err, expected);
        }
    }

    #[test]
    fn test_uninitialised_meta_is_rejected() {
        let meta = ModelMeta::new("Person");
        let err = QueryParser::get_query_node_for_query(&meta, &json!({})).unwrap_err();
        assert!(err.to_string().starts_with("MetadataError"));
    }
}
