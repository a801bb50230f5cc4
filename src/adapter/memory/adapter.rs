//! 内存后端适配器
//!
//! 按模型名保存有序记录列表，按"模型 + 字段"维护自增计数器（从 1 开始）

use super::utils::Record;
use crate::adapter::Backend;
use crate::config::DEFAULT_READ_LIMIT;
use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::Model;
use crate::odm::{
    CreateOptions, ExecArgs, ExecOptions, ModelOperationResult, OperationMeta, ReadOptions,
    RemoveOptions, UpdateOptions,
};
use crate::query::QueryParser;
use crate::types::DataValue;
use async_trait::async_trait;
use parking_lot::Mutex;
use rat_logger::{debug, info};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub(crate) storage: HashMap<String, Vec<Record>>,
    /// 模型名 -> 字段名 -> 下一个自增值
    pub(crate) sequences: HashMap<String, HashMap<String, i64>>,
}

/// 内存后端
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    pub(crate) state: Mutex<MemoryState>,
}

impl InMemoryBackend {
    /// 创建空的内存后端
    pub fn new() -> Self {
        info!("创建内存后端");
        Self::default()
    }

    /// 批量载入记录，替换模型现有的全部记录
    ///
    /// `data` 必须是对象数组。
    pub async fn load(
        &self,
        registry: &ModelRegistry,
        model_name: &str,
        data: &JsonValue,
        result: ModelOperationResult,
    ) -> RevResult<ModelOperationResult> {
        let meta = registry.get_model_meta(model_name)?;
        let items = data.as_array().ok_or_else(|| {
            crate::rev_error!(argument, "load() data must be an array of objects")
        })?;
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let obj = item.as_object().ok_or_else(|| {
                crate::rev_error!(argument, "load() data must be an array of objects")
            })?;
            records.push(
                obj.iter()
                    .map(|(k, v)| (k.clone(), DataValue::from(v.clone())))
                    .collect::<Record>(),
            );
        }
        self.replace_records(&meta, records)?;
        Ok(result)
    }

    /// 模型当前保存的记录数
    pub fn record_count(&self, model_name: &str) -> usize {
        self.state
            .lock()
            .storage
            .get(model_name)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn create(
        &self,
        registry: &ModelRegistry,
        model: &Model,
        mut result: ModelOperationResult,
        _options: &CreateOptions,
    ) -> RevResult<ModelOperationResult> {
        let meta = registry.get_model_meta(model.model_name())?;
        if meta.singleton {
            return Err(crate::rev_error!(
                backend,
                format!("create() cannot be called on singleton model {}", meta.name)
            ));
        }
        let record = self.insert_record(&meta, model)?;
        result.result = Some(Model::from_values(meta.name.clone(), record));
        Ok(result)
    }

    async fn read(
        &self,
        registry: &ModelRegistry,
        model_name: &str,
        where_clause: &JsonValue,
        mut result: ModelOperationResult,
        options: &ReadOptions,
    ) -> RevResult<ModelOperationResult> {
        let meta = registry.get_model_meta(model_name)?;
        let limit = options.limit.unwrap_or(DEFAULT_READ_LIMIT);
        let offset = options.offset.unwrap_or(0);
        if limit < 1 {
            return Err(crate::rev_error!(argument, "options.limit cannot be less than 1"));
        }
        if offset < 0 {
            return Err(crate::rev_error!(argument, "options.offset cannot be less than zero"));
        }

        let query = QueryParser::get_query_node_for_query(&meta, where_clause)?;
        let (total, records) = self.select_records(
            &meta,
            &query,
            options.order_by.as_deref(),
            offset as usize,
            limit as usize,
        )?;
        debug!("内存后端读取 {}: 匹配 {} 条, 返回 {} 条", meta.name, total, records.len());

        result.results = Some(
            records
                .into_iter()
                .map(|r| Model::from_values(meta.name.clone(), r))
                .collect(),
        );
        result.set_meta(OperationMeta {
            offset: Some(offset),
            limit: Some(limit),
            total_count: Some(total),
            order_by: options.order_by.clone(),
        });
        Ok(result)
    }

    async fn update(
        &self,
        registry: &ModelRegistry,
        model: &Model,
        where_clause: &JsonValue,
        mut result: ModelOperationResult,
        options: &UpdateOptions,
    ) -> RevResult<ModelOperationResult> {
        let meta = registry.get_model_meta(model.model_name())?;
        let query = QueryParser::get_query_node_for_query(&meta, where_clause)?;
        let match_all = where_clause.as_object().is_some_and(|clause| clause.is_empty());
        let count = self.update_records(
            &meta,
            model,
            &query,
            match_all,
            options.fields.as_deref(),
        )?;
        result.set_meta(OperationMeta {
            total_count: Some(count),
            ..Default::default()
        });
        Ok(result)
    }

    async fn remove(
        &self,
        registry: &ModelRegistry,
        model: &Model,
        where_clause: &JsonValue,
        mut result: ModelOperationResult,
        _options: &RemoveOptions,
    ) -> RevResult<ModelOperationResult> {
        let meta = registry.get_model_meta(model.model_name())?;
        let query = QueryParser::get_query_node_for_query(&meta, where_clause)?;
        let count = self.delete_records(&meta, &query);
        result.set_meta(OperationMeta {
            total_count: Some(count),
            ..Default::default()
        });
        Ok(result)
    }

    async fn exec(
        &self,
        _registry: &ModelRegistry,
        model: &Model,
        method: &str,
        _args: &ExecArgs,
        _result: ModelOperationResult,
        _options: &ExecOptions,
    ) -> RevResult<ModelOperationResult> {
        Err(crate::rev_error!(
            backend,
            format!(
                "InMemoryBackend does not support exec(): method '{}' on model {}",
                method,
                model.model_name()
            )
        ))
    }
}
