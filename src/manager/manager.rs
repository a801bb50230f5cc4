//! 模型管理器
//!
//! 共享一个注册表的轻量句柄，可克隆后在多个任务中使用

use super::ModelRegistry;
use crate::adapter::Backend;
use crate::error::RevResult;
use crate::model::{Model, ModelDefinition, ModelMeta, ModelValidationResult};
use crate::odm::{self, types::*, ModelOperations};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ModelManager {
    registry: Arc<ModelRegistry>,
}

impl ModelManager {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn from_registry(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// 注册模型定义
    pub fn register<T: ModelDefinition>(&self, meta: Option<ModelMeta>) -> RevResult<()> {
        self.registry.register::<T>(meta)
    }

    /// 注册命名后端
    pub fn register_backend(&self, name: &str, backend: Arc<dyn Backend>) -> RevResult<()> {
        self.registry.register_backend(name, backend)
    }

    pub fn get_model_meta(&self, name: &str) -> RevResult<Arc<ModelMeta>> {
        self.registry.get_model_meta(name)
    }

    pub fn get_backend(&self, name: &str) -> RevResult<Arc<dyn Backend>> {
        self.registry.get_backend(name)
    }
}

#[async_trait]
impl ModelOperations for ModelManager {
    async fn validate(
        &self,
        model: &Model,
        operation: &ModelOperation,
        options: Option<ValidationOptions>,
    ) -> RevResult<ModelValidationResult> {
        odm::validate(&self.registry, model, operation, options).await
    }

    async fn create(
        &self,
        model: &Model,
        options: Option<CreateOptions>,
    ) -> RevResult<ModelOperationResult> {
        odm::create(&self.registry, model, options).await
    }

    async fn read(
        &self,
        model_name: &str,
        where_clause: Option<JsonValue>,
        options: Option<ReadOptions>,
    ) -> RevResult<ModelOperationResult> {
        odm::read(&self.registry, model_name, where_clause, options).await
    }

    async fn update(
        &self,
        model: &Model,
        options: Option<UpdateOptions>,
    ) -> RevResult<ModelOperationResult> {
        odm::update(&self.registry, model, options).await
    }

    async fn remove(
        &self,
        model: &Model,
        options: Option<RemoveOptions>,
    ) -> RevResult<ModelOperationResult> {
        odm::remove(&self.registry, model, options).await
    }

    async fn exec(
        &self,
        model: &Model,
        method: &str,
        args: ExecArgs,
        options: Option<ExecOptions>,
    ) -> RevResult<ModelOperationResult> {
        odm::exec(&self.registry, model, method, args, options).await
    }
}
