//! 内存后端辅助方法模块

use crate::error::RevResult;
use crate::types::{DataValue, SortConfig, SortDirection};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 存储中的一条记录
pub(crate) type Record = BTreeMap<String, DataValue>;

/// 解析 order_by 条目
pub(crate) fn parse_order_by(entries: &[String]) -> RevResult<Vec<SortConfig>> {
    entries
        .iter()
        .map(|entry| {
            SortConfig::parse(entry).ok_or_else(|| {
                crate::rev_error!(backend, format!("invalid order_by entry '{}'", entry))
            })
        })
        .collect()
}

/// 按多个排序键稳定排序，空值排在最前
pub(crate) fn sort_records(records: &mut [Record], sort: &[SortConfig]) {
    if sort.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        for key in sort {
            let left = a.get(&key.field).unwrap_or(&DataValue::Null);
            let right = b.get(&key.field).unwrap_or(&DataValue::Null);
            let ordering = match key.direction {
                SortDirection::Asc => left.sort_cmp(right),
                SortDirection::Desc => right.sort_cmp(left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// 取 [offset, offset + limit) 区间，越界时返回空
pub(crate) fn paginate(records: Vec<Record>, offset: usize, limit: usize) -> Vec<Record> {
    records.into_iter().skip(offset).take(limit).collect()
}
