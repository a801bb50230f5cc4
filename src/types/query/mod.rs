use serde::{Deserialize, Serialize};

/// 逻辑操作符（条件组合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// `$and`
    And,
    /// `$or`
    Or,
}

impl LogicalOperator {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "$and" => Some(LogicalOperator::And),
            "$or" => Some(LogicalOperator::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "$and",
            LogicalOperator::Or => "$or",
        }
    }
}

/// 字段操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldOperator {
    /// 等于
    Eq,
    /// 不等于
    Ne,
    /// 大于
    Gt,
    /// 大于等于
    Gte,
    /// 小于
    Lt,
    /// 小于等于
    Lte,
    /// 通配符匹配，`%` 匹配任意字符序列
    Like,
    /// 在列表中
    In,
    /// 不在列表中
    Nin,
}

impl FieldOperator {
    /// 所有可识别的字段操作符
    pub const ALL: [FieldOperator; 9] = [
        FieldOperator::Eq,
        FieldOperator::Ne,
        FieldOperator::Gt,
        FieldOperator::Gte,
        FieldOperator::Lt,
        FieldOperator::Lte,
        FieldOperator::Like,
        FieldOperator::In,
        FieldOperator::Nin,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOperator::Eq => "$eq",
            FieldOperator::Ne => "$ne",
            FieldOperator::Gt => "$gt",
            FieldOperator::Gte => "$gte",
            FieldOperator::Lt => "$lt",
            FieldOperator::Lte => "$lte",
            FieldOperator::Like => "$like",
            FieldOperator::In => "$in",
            FieldOperator::Nin => "$nin",
        }
    }

    /// 操作数是否为值列表
    pub fn takes_list(&self) -> bool {
        matches!(self, FieldOperator::In | FieldOperator::Nin)
    }
}

impl std::fmt::Display for FieldOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// 升序
    Asc,
    /// 降序
    Desc,
}

/// 排序配置（由 `"field [asc|desc]"` 形式的条目解析而来）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// 字段名
    pub field: String,
    /// 排序方向
    pub direction: SortDirection,
}

impl SortConfig {
    /// 解析单个 order_by 条目，格式不合法时返回 None
    ///
    /// 不检查字段是否存在。
    pub fn parse(entry: &str) -> Option<Self> {
        let tokens: Vec<&str> = entry.split(' ').collect();
        let direction = match tokens.as_slice() {
            [_] => SortDirection::Asc,
            [_, "asc"] => SortDirection::Asc,
            [_, "desc"] => SortDirection::Desc,
            _ => return None,
        };
        Some(Self {
            field: tokens[0].to_string(),
            direction,
        })
    }
}
