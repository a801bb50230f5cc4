//! 内存后端存储操作
//!
//! 所有读改写都在同一次加锁内完成，自增序列的读取和递增之间没有挂起点。

use super::adapter::{InMemoryBackend, MemoryState};
use super::utils::{paginate, parse_order_by, sort_records, Record};
use crate::error::{RevError, RevResult};
use crate::model::{FieldKind, Model, ModelMeta};
use crate::query::QueryNode;
use crate::types::DataValue;
use rat_logger::debug;

impl MemoryState {
    /// 取下一个自增值并递增计数器
    pub(crate) fn next_sequence(&mut self, model: &str, field: &str) -> RevResult<i64> {
        let counter = self
            .sequences
            .entry(model.to_string())
            .or_default()
            .entry(field.to_string())
            .or_insert(1);
        let value = *counter;
        *counter = value
            .checked_add(1)
            .ok_or_else(|| sequence_exhausted(model, field))?;
        Ok(value)
    }

    /// 保证计数器大于已存在的最大值
    pub(crate) fn bump_sequence(&mut self, model: &str, field: &str, seen: i64) -> RevResult<()> {
        let next = seen
            .checked_add(1)
            .ok_or_else(|| sequence_exhausted(model, field))?;
        let counter = self
            .sequences
            .entry(model.to_string())
            .or_default()
            .entry(field.to_string())
            .or_insert(1);
        if next > *counter {
            *counter = next;
        }
        Ok(())
    }

    pub(crate) fn records(&self, model: &str) -> &[Record] {
        self.storage.get(model).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn records_mut(&mut self, model: &str) -> &mut Vec<Record> {
        self.storage.entry(model.to_string()).or_default()
    }
}

fn sequence_exhausted(model: &str, field: &str) -> RevError {
    crate::rev_error!(
        backend,
        format!("auto number sequence for {}.{} is exhausted", model, field)
    )
}

impl InMemoryBackend {
    /// 把模型上已定义的字段值写入记录；自增字段不从模型取值
    fn write_fields(model: &Model, meta: &ModelMeta, record: &mut Record, fields: Option<&[String]>) {
        for field in &meta.fields {
            if field.kind.is_auto_number() {
                continue;
            }
            if let Some(only) = fields {
                if !only.iter().any(|f| f == &field.name) {
                    continue;
                }
            }
            if let Some(value) = model.get(&field.name) {
                record.insert(field.name.clone(), value.clone());
            }
        }
    }

    fn assign_sequences(
        state: &mut MemoryState,
        meta: &ModelMeta,
        record: &mut Record,
    ) -> RevResult<()> {
        for field in meta.fields.iter().filter(|f| f.kind.is_auto_number()) {
            let next = state.next_sequence(&meta.name, &field.name)?;
            record.insert(field.name.clone(), DataValue::Int(next));
        }
        Ok(())
    }

    pub(crate) fn insert_record(&self, meta: &ModelMeta, model: &Model) -> RevResult<Record> {
        let mut record = Record::new();
        Self::write_fields(model, meta, &mut record, None);

        let mut state = self.state.lock();
        Self::assign_sequences(&mut state, meta, &mut record)?;
        state.records_mut(&meta.name).push(record.clone());
        debug!("内存后端写入记录: {} {:?}", meta.name, record);
        Ok(record)
    }

    /// 更新匹配的记录，返回更新条数
    ///
    /// `match_all` 为 true 的单例模型在存储为空时插入一条新记录。
    pub(crate) fn update_records(
        &self,
        meta: &ModelMeta,
        model: &Model,
        query: &QueryNode,
        match_all: bool,
        fields: Option<&[String]>,
    ) -> RevResult<usize> {
        if let Some(fields) = fields {
            if let Some(unknown) = fields.iter().find(|f| !meta.has_field(f)) {
                return Err(crate::rev_error!(
                    backend,
                    format!("update(): field '{}' does not exist in model {}", unknown, meta.name)
                ));
            }
        }

        let mut state = self.state.lock();
        if meta.singleton && match_all && state.records(&meta.name).is_empty() {
            let mut record = Record::new();
            Self::write_fields(model, meta, &mut record, fields);
            Self::assign_sequences(&mut state, meta, &mut record)?;
            state.records_mut(&meta.name).push(record);
            debug!("内存后端初始化单例记录: {}", meta.name);
            return Ok(1);
        }

        let mut count = 0;
        for record in state.records_mut(&meta.name).iter_mut() {
            if query.test_record(record) {
                Self::write_fields(model, meta, record, fields);
                count += 1;
            }
        }
        debug!("内存后端更新记录: {} 条 ({})", count, meta.name);
        Ok(count)
    }

    /// 返回匹配记录的总数和排序分页后的记录
    pub(crate) fn select_records(
        &self,
        meta: &ModelMeta,
        query: &QueryNode,
        order_by: Option<&[String]>,
        offset: usize,
        limit: usize,
    ) -> RevResult<(usize, Vec<Record>)> {
        let sort = match order_by {
            Some(entries) => parse_order_by(entries)?,
            None => Vec::new(),
        };
        let mut matched: Vec<Record> = {
            let state = self.state.lock();
            state
                .records(&meta.name)
                .iter()
                .filter(|r| query.test_record(r))
                .cloned()
                .collect()
        };
        let total = matched.len();
        sort_records(&mut matched, &sort);
        Ok((total, paginate(matched, offset, limit)))
    }

    /// 删除匹配的记录，返回删除条数
    pub(crate) fn delete_records(&self, meta: &ModelMeta, query: &QueryNode) -> usize {
        let mut state = self.state.lock();
        let records = state.records_mut(&meta.name);
        let (removed, kept): (Vec<Record>, Vec<Record>) =
            records.drain(..).partition(|r| query.test_record(r));
        *records = kept;
        debug!("内存后端删除记录: {} 条 ({})", removed.len(), meta.name);
        removed.len()
    }

    /// 替换模型的全部记录，并把自增计数器推进到已有最大值之后
    ///
    /// 任一自增字段无法推进时不做任何修改。
    pub(crate) fn replace_records(&self, meta: &ModelMeta, records: Vec<Record>) -> RevResult<()> {
        let mut seen = Vec::new();
        for field in &meta.fields {
            if let FieldKind::AutoNumber(_) = field.kind {
                let max = records
                    .iter()
                    .filter_map(|r| r.get(&field.name).and_then(DataValue::as_i64))
                    .max();
                if let Some(max) = max {
                    if max == i64::MAX {
                        return Err(sequence_exhausted(&meta.name, &field.name));
                    }
                    seen.push((field.name.as_str(), max));
                }
            }
        }

        let mut state = self.state.lock();
        for (field, max) in seen {
            state.bump_sequence(&meta.name, field, max)?;
        }
        debug!("内存后端加载记录: {} 条 ({})", records.len(), meta.name);
        *state.records_mut(&meta.name) = records;
        Ok(())
    }
}
