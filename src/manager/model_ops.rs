//! 模型注册相关方法

use super::ModelRegistry;
use crate::error::RevResult;
use crate::model::{ModelDefinition, ModelMeta};
use dashmap::mapref::entry::Entry;
use rat_logger::{debug, info};
use std::sync::Arc;

impl ModelRegistry {
    /// 注册类型化模型
    ///
    /// 未提供 `meta` 时由 `T::meta()` 生成；提供的 `meta` 没有字段时使用 `T::fields()`。
    /// `meta.name` 为空时取 `T::model_name()`，否则必须与之相同。
    pub fn register<T: ModelDefinition>(&self, meta: Option<ModelMeta>) -> RevResult<()> {
        let mut meta = match meta {
            Some(meta) => meta,
            None => T::meta()?,
        };
        if meta.name.is_empty() {
            meta.name = T::model_name().to_string();
        } else if meta.name != T::model_name() {
            return Err(crate::rev_error!(
                model,
                format!(
                    "Model name does not match meta.name ('{}' != '{}'). To register the model under a different name you should rename the model.",
                    T::model_name(),
                    meta.name
                )
            ));
        }
        if meta.fields.is_empty() {
            meta = meta.fields(T::fields()?);
        }
        self.register_meta(meta)
    }

    /// 注册动态构造的模型元数据
    pub fn register_meta(&self, mut meta: ModelMeta) -> RevResult<()> {
        if meta.name.is_empty() {
            return Err(crate::rev_error!(model, "model name must be a non-empty string"));
        }
        if self.models.contains_key(&meta.name) {
            return Err(already_exists(&meta.name));
        }
        meta.initialise(&self.config().default_backend)?;

        match self.models.entry(meta.name.clone()) {
            Entry::Occupied(_) => Err(already_exists(&meta.name)),
            Entry::Vacant(slot) => {
                info!(
                    "注册模型: {} (字段 {} 个, 后端 {})",
                    meta.name,
                    meta.fields.len(),
                    meta.backend_name()
                );
                slot.insert(Arc::new(meta));
                Ok(())
            }
        }
    }

    /// 模型是否已注册
    pub fn is_registered(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// 获取模型元数据
    pub fn get_model_meta(&self, name: &str) -> RevResult<Arc<ModelMeta>> {
        let meta = self
            .models
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                crate::rev_error!(
                    not_found,
                    format!("Model '{}' does not exist in the registry.", name)
                )
            })?;
        debug!("获取模型元数据: {}", name);
        Ok(meta)
    }

    /// 已注册的模型名（按名称排序）
    pub fn get_model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

fn already_exists(name: &str) -> crate::error::RevError {
    crate::rev_error!(
        model,
        format!("Model '{}' already exists in the registry.", name)
    )
}
